use quickform_extern_contracts::emailjs::{EmailJsApiService, EmailJsTemplateParams};
use quickform_extern_impl::{
    emailjs::{EmailJsApiServiceConfig, EmailJsApiServiceImpl},
    http::HttpClient,
};
use quickform_models::emailjs::EmailJsCredentials;
use quickform_testing::emailjs::{EmailJsFake, SEND_ROUTE};
use serde_json::json;

#[tokio::test]
async fn send() {
    let (sut, fake) = make_sut().await;

    sut.send(&credentials("public-key"), &params()).await.unwrap();

    let sent = fake.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        serde_json::Value::Object(sent[0].clone()),
        json!({
            "name": "Alice Doe",
            "email": "alice@example.com",
            "telephone": "+229 01 02 03 04 05",
            "formation": "Création de site web avec WordPress",
            "message": "Aucun message",
            "title": "Nouvelle inscription - Formation WordPress",
            "reply_to": "alice@example.com",
            "sent_date": 2026,
        })
    );
}

#[tokio::test]
async fn rejected() {
    let (sut, fake) = make_sut().await;

    let err = sut
        .send(&credentials("wrong-key"), &params())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("The Public Key is invalid"), "{err}");
    assert!(fake.sent().is_empty());
}

async fn make_sut() -> (EmailJsApiServiceImpl, EmailJsFake) {
    let fake = EmailJsFake::new("service_test", "template_test", "public-key");
    let addr = quickform_testing::spawn(fake.router()).await.unwrap();

    let config =
        EmailJsApiServiceConfig::new(Some(format!("http://{addr}{SEND_ROUTE}").parse().unwrap()))
            .unwrap();
    let sut = EmailJsApiServiceImpl::new(config, HttpClient::new().unwrap());

    (sut, fake)
}

fn credentials(public_key: &str) -> EmailJsCredentials {
    EmailJsCredentials::from_parts(
        Some("service_test".into()),
        Some("template_test".into()),
        Some(public_key.into()),
    )
    .unwrap()
}

fn params() -> EmailJsTemplateParams {
    EmailJsTemplateParams {
        name: "Alice Doe".into(),
        email: "alice@example.com".into(),
        telephone: "+229 01 02 03 04 05".into(),
        formation: "Création de site web avec WordPress".into(),
        message: "Aucun message".into(),
        title: "Nouvelle inscription - Formation WordPress".into(),
        reply_to: "alice@example.com".into(),
        sent_date: 2026,
    }
}
