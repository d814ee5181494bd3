pub mod modules {
    pub mod leave_applications {
        pub mod core {
            pub mod attachment;
            pub mod leave_request;
            pub mod leave_type;
            pub mod outcome;
            pub mod ports;
        }
        pub mod use_cases {
            pub mod validate_leave_request {
                pub mod field_errors;
                pub mod validate;
            }
            pub mod submit_leave_application {
                pub mod handler;
            }
            pub mod fill_leave_form {
                pub mod controller;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod http_leave_backend;
                pub mod in_memory_leave_backend;
            }
        }
    }
}

pub mod shell;
