use chrono::{DateTime, Utc};
use relay_models::{contact::ContactSubmission, metadata::ConnectionMetadata};

const PHONE_NOT_PROVIDED: &str = "Not provided";

/// Renders the html body of the email forwarded to the recipient.
pub(crate) fn render(
    submission: &ContactSubmission,
    metadata: &ConnectionMetadata,
    submitted_at: DateTime<Utc>,
) -> String {
    let name = escape(&submission.name);
    let email = escape(&submission.email);
    let phone = submission
        .phone
        .as_ref()
        .map_or_else(|| PHONE_NOT_PROVIDED.into(), |phone| escape(phone));
    let message = line_breaks(&escape(&submission.message));
    let submitted_at = submitted_at.format("%Y-%m-%d %H:%M:%S UTC");

    let connection = metadata
        .entries()
        .into_iter()
        .map(|(label, value)| format!("<li><strong>{label}:</strong> {}</li>\n", escape(value)))
        .collect::<String>();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>New Contact Form Submission</title></head>
<body>
<h2>New Contact Form Submission</h2>
<p><strong>Name:</strong> {name}</p>
<p><strong>Email:</strong> {email}</p>
<p><strong>Phone:</strong> {phone}</p>
<p><strong>Message:</strong></p>
<p>{message}</p>
<hr>
<h3>Connection Information</h3>
<ul>
{connection}</ul>
<p><small>Submitted at {submitted_at}</small></p>
</body>
</html>
"#
    )
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn line_breaks(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\n', "<br>\n")
}
