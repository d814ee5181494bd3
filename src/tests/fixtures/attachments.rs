// Attachment fixtures of arbitrary size.

use crate::modules::leave_applications::core::attachment::Attachment;

pub const MB: usize = 1_000_000;

pub fn pdf_attachment(size: usize) -> Attachment {
    Attachment::new(
        "medical-certificate.pdf",
        Some("application/pdf".to_string()),
        vec![0x25; size],
    )
}

pub fn png_attachment(size: usize) -> Attachment {
    Attachment::new("medical-certificate.png", Some("image/png".to_string()), vec![0x89; size])
}

pub fn gif_attachment(size: usize) -> Attachment {
    Attachment::new("medical-certificate.gif", Some("image/gif".to_string()), vec![0x47; size])
}
