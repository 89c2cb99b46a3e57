//! Multipart record form: text fields plus an optional `attachment` file.

use axum::extract::Multipart;
use engine::{Money, RecordFields};

use crate::{
    ServerError,
    attachments::{Attachment, AttachmentStore},
};

/// Raw form fields as sent by the client.
#[derive(Debug, Default)]
pub(crate) struct RecordForm {
    pub name: Option<String>,
    pub amount: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
    pub attachment: Option<Attachment>,
}

impl RecordForm {
    /// Reads every part of the request. Unknown fields are ignored.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ServerError> {
        let mut form = RecordForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "attachment" => {
                    let file_name = field.file_name().unwrap_or("attachment").to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;
                    // Browsers send an empty part when no file was picked.
                    if !bytes.is_empty() {
                        form.attachment = Some(Attachment {
                            file_name,
                            content_type,
                            bytes,
                        });
                    }
                }
                "name" | "amount" | "date" | "notes" => {
                    let value = field.text().await?;
                    match name.as_str() {
                        "name" => form.name = Some(value),
                        "amount" => form.amount = Some(value),
                        "date" => form.date = Some(value),
                        _ => form.notes = Some(value),
                    }
                }
                other => tracing::debug!("ignoring unknown form field {other}"),
            }
        }

        Ok(form)
    }

    /// Validates the text fields, uploads the attachment and returns the
    /// record payload.
    ///
    /// Validation runs before the upload so a rejected form never leaves a
    /// file behind. A failed upload is logged and stored as no attachment.
    pub async fn into_fields(
        self,
        attachments: &dyn AttachmentStore,
    ) -> Result<RecordFields, ServerError> {
        let amount: Money = self.amount.as_deref().unwrap_or_default().parse()?;
        let date = engine::parse_date(self.date.as_deref().unwrap_or_default())?;

        let attachment = match self.attachment {
            Some(file) => {
                let file_name = file.file_name.clone();
                match attachments.store(file).await {
                    Ok(url) => url,
                    Err(err) => {
                        tracing::warn!("upload of {file_name} failed, saving without attachment: {err}");
                        String::new()
                    }
                }
            }
            None => String::new(),
        };

        Ok(RecordFields {
            name: self.name.unwrap_or_default(),
            amount,
            date,
            notes: self.notes.unwrap_or_default(),
            attachment,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::Bytes;

    use super::*;
    use crate::attachments::UploadError;

    struct Failing;

    #[async_trait]
    impl AttachmentStore for Failing {
        async fn store(&self, _: Attachment) -> Result<String, UploadError> {
            Err(UploadError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
        }
    }

    struct Fixed;

    #[async_trait]
    impl AttachmentStore for Fixed {
        async fn store(&self, attachment: Attachment) -> Result<String, UploadError> {
            Ok(format!("https://files.example.com/{}", attachment.file_name))
        }
    }

    fn form() -> RecordForm {
        RecordForm {
            name: Some("Coffee".to_string()),
            amount: Some("-4.5".to_string()),
            date: Some("2024-01-05".to_string()),
            notes: Some("morning".to_string()),
            attachment: Some(Attachment {
                file_name: "receipt.png".to_string(),
                content_type: None,
                bytes: Bytes::from_static(b"png"),
            }),
        }
    }

    #[tokio::test]
    async fn fields_are_parsed_and_upload_url_kept() {
        let fields = form().into_fields(&Fixed).await.unwrap();
        assert_eq!(fields.name, "Coffee");
        assert_eq!(fields.amount, Money::new(-450));
        assert_eq!(fields.date.to_string(), "2024-01-05");
        assert_eq!(fields.attachment, "https://files.example.com/receipt.png");
    }

    #[tokio::test]
    async fn failed_upload_means_no_attachment() {
        let fields = form().into_fields(&Failing).await.unwrap();
        assert_eq!(fields.attachment, "");
    }

    #[tokio::test]
    async fn missing_text_fields_default_to_empty() {
        let form = RecordForm {
            amount: Some("3".to_string()),
            date: Some("2024-01-05".to_string()),
            ..RecordForm::default()
        };
        let fields = form.into_fields(&Fixed).await.unwrap();
        assert_eq!(fields.name, "");
        assert_eq!(fields.notes, "");
        assert_eq!(fields.attachment, "");
    }

    #[tokio::test]
    async fn bad_amount_or_date_is_rejected() {
        let mut bad_amount = form();
        bad_amount.amount = Some("four".to_string());
        assert!(matches!(
            bad_amount.into_fields(&Fixed).await,
            Err(ServerError::Engine(engine::EngineError::InvalidAmount(_)))
        ));

        let mut no_date = form();
        no_date.date = None;
        assert!(matches!(
            no_date.into_fields(&Fixed).await,
            Err(ServerError::Engine(engine::EngineError::InvalidArgument(_)))
        ));
    }
}
