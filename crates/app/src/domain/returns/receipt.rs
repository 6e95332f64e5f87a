//! QR receipt rendering.

use std::io::Cursor;

use image::{ImageFormat, Luma};
use jiff::Timestamp;
use qrcode::QrCode;
use thiserror::Error;

use crate::domain::returns::models::ReturnUuid;

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("QR encoding failed")]
    Qr(#[from] qrcode::types::QrError),

    #[error("PNG encoding failed")]
    Png(#[from] image::ImageError),
}

/// The text encoded into the receipt: return id, customer, book title, and
/// the request instant.
#[must_use]
pub fn receipt_content(
    return_uuid: ReturnUuid,
    customer_email: &str,
    book_title: &str,
    requested_at: Timestamp,
) -> String {
    format!(
        "Return {return_uuid}\nCustomer: {customer_email}\nBook: {book_title}\nDate: {}",
        requested_at.strftime("%Y-%m-%d %H:%M")
    )
}

/// Render the receipt content as a PNG QR code.
///
/// # Errors
///
/// Returns an error when QR or PNG encoding fails; the caller keeps the
/// already-persisted return either way.
pub fn render_receipt_png(content: &str) -> Result<Vec<u8>, ReceiptError> {
    let code = QrCode::new(content.as_bytes())?;
    let rendered = code.render::<Luma<u8>>().build();

    let mut bytes = Cursor::new(Vec::new());

    rendered.write_to(&mut bytes, ImageFormat::Png)?;

    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn content_carries_all_four_fields() {
        let uuid = ReturnUuid::from_uuid(Uuid::nil());

        let content = receipt_content(
            uuid,
            "reader@example.com",
            "Rayuela",
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(
            content,
            format!(
                "Return {uuid}\nCustomer: reader@example.com\nBook: Rayuela\nDate: 1970-01-01 00:00"
            )
        );
    }

    #[test]
    fn rendered_receipt_is_a_png() {
        let content = receipt_content(
            ReturnUuid::new(),
            "reader@example.com",
            "Rayuela",
            Timestamp::UNIX_EPOCH,
        );

        let png = render_receipt_png(&content).expect("rendering should succeed");

        assert!(
            png.starts_with(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']),
            "receipt should carry the PNG signature"
        );
    }
}
