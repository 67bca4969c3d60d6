use std::time::Duration;

use pretty_assertions::assert_eq;
use relay_email_contracts::{ContentType, Email, EmailService};
use relay_email_impl::{EmailServiceConfig, EmailServiceImpl};
use relay_testing::email::TestingEmailProvider;

const API_KEY: &str = "re_test_key";

#[tokio::test]
async fn send_html_email() {
    let (provider, sut) = setup(API_KEY).await;

    let result = sut
        .send(Email {
            recipient: "Support <support@example.com>".parse().unwrap(),
            subject: "The Subject".into(),
            body: "<h1>Hello World!</h1>".into(),
            content_type: ContentType::Html,
            reply_to: Some("replyto@example.com".into()),
        })
        .await
        .unwrap();

    assert!(result);

    let mut outbox = provider.outbox.take();
    assert_eq!(outbox.len(), 1);
    let mail = outbox.pop().unwrap();
    assert!(mail.from.contains("Contact Form"));
    assert!(mail.from.ends_with("<noreply@example.com>"));
    assert!(mail.to.contains("Support"));
    assert!(mail.to.ends_with("<support@example.com>"));
    assert_eq!(mail.subject, "The Subject");
    assert_eq!(mail.html.as_deref(), Some("<h1>Hello World!</h1>"));
    assert_eq!(mail.text, None);
    assert_eq!(mail.reply_to.as_deref(), Some("replyto@example.com"));
}

#[tokio::test]
async fn send_text_email() {
    let (provider, sut) = setup(API_KEY).await;

    let result = sut
        .send(Email {
            recipient: "test@example.com".parse().unwrap(),
            subject: "Email Deliverability Test".into(),
            body: "It works!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await
        .unwrap();

    assert!(result);

    let mail = provider.outbox.take().pop().unwrap();
    assert_eq!(mail.to, "test@example.com");
    assert_eq!(mail.text.as_deref(), Some("It works!"));
    assert_eq!(mail.html, None);
    assert_eq!(mail.reply_to, None);
}

#[tokio::test]
async fn rejected_by_provider() {
    let (provider, sut) = setup("some-other-key").await;

    let result = sut
        .send(Email {
            recipient: "test@example.com".parse().unwrap(),
            subject: "Subject".into(),
            body: "Body".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await
        .unwrap();

    assert!(!result);
    assert!(provider.outbox.take().is_empty());
}

#[tokio::test]
async fn provider_unreachable() {
    let config = EmailServiceConfig::new(
        Some("http://127.0.0.1:1/emails".parse().unwrap()),
        API_KEY.into(),
        "noreply@example.com".parse().unwrap(),
    )
    .unwrap();
    let sut = EmailServiceImpl::new(config);

    let result = sut
        .send(Email {
            recipient: "test@example.com".parse().unwrap(),
            subject: "Subject".into(),
            body: "Body".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await;

    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn slow_provider_is_awaited() {
    let provider = relay_testing::email::spawn_with_delay(API_KEY, Duration::from_secs(120))
        .await
        .unwrap();
    let config = EmailServiceConfig::new(
        Some(provider.endpoint.clone()),
        API_KEY.into(),
        "noreply@example.com".parse().unwrap(),
    )
    .unwrap();
    let sut = EmailServiceImpl::new(config);

    let result = sut
        .send(Email {
            recipient: "test@example.com".parse().unwrap(),
            subject: "Subject".into(),
            body: "Body".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await
        .unwrap();

    assert!(result);
    assert_eq!(provider.outbox.take().len(), 1);
}

#[test]
fn default_endpoint() {
    let config = EmailServiceConfig::new(
        None,
        API_KEY.into(),
        "noreply@example.com".parse().unwrap(),
    )
    .unwrap();
    let sut = EmailServiceImpl::new(config);
    assert_eq!(sut.endpoint().as_str(), relay_email_impl::SEND_ENDPOINT);
}

async fn setup(client_api_key: &str) -> (TestingEmailProvider, EmailServiceImpl) {
    let provider = relay_testing::email::spawn(API_KEY).await.unwrap();

    let config = EmailServiceConfig::new(
        Some(provider.endpoint.clone()),
        client_api_key.into(),
        "Contact Form <noreply@example.com>".parse().unwrap(),
    )
    .unwrap();

    (provider, EmailServiceImpl::new(config))
}
