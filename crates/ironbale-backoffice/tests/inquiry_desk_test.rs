use chrono::Duration;
use ironbale_backoffice::*;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

async fn signed_in() -> (InMemorySessionProvider, Session) {
    let sessions = InMemorySessionProvider::new(
        [OperatorAccount { email: "sales@ironbale.example".into(), api_key: "secret".into() }],
        Duration::minutes(60),
    );
    let session = sessions.sign_in("sales@ironbale.example", "secret").await.unwrap();
    (sessions, session)
}

fn inquiry(name: &str) -> NewInquiry {
    NewInquiry {
        name: name.into(),
        email: format!("{}@plant.example", name.to_lowercase()),
        message: "Please call back".into(),
        ..NewInquiry::default()
    }
}

#[tokio::test]
async fn quote_request_keeps_estimate_and_source() {
    let desk = InquiryDesk::new(Arc::new(InMemoryInquiryRepository::new()));
    let estimate = json!({
        "calculator": "baler_sizing",
        "inputs": { "material": "cardboard", "tons_per_day": 40.0 },
        "result": { "recommended_model": "HB-500" }
    });

    let submitted = desk
        .submit(NewInquiry {
            source: Some("calculator:baler_sizing".into()),
            estimate: Some(estimate.clone()),
            ..inquiry("Ana")
        })
        .await
        .unwrap();

    let stored = desk.get(submitted.id).await.unwrap();
    assert_eq!(stored.source, "calculator:baler_sizing");
    assert_eq!(stored.estimate, Some(estimate));
}

#[tokio::test]
async fn invalid_submission_is_not_stored() {
    let desk = InquiryDesk::new(Arc::new(InMemoryInquiryRepository::new()));
    let err = desk
        .submit(NewInquiry { email: "no-at-sign".into(), ..inquiry("Bo") })
        .await
        .unwrap_err();
    assert!(matches!(err, BackofficeError::Validation { .. }));
    assert!(desk.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn status_workflow_and_filtering() {
    let (_sessions, session) = signed_in().await;
    let desk = InquiryDesk::new(Arc::new(InMemoryInquiryRepository::new()));

    let first = desk.submit(inquiry("Cy")).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = desk.submit(inquiry("Di")).await.unwrap();

    let all = desk.list(None).await.unwrap();
    assert_eq!(all.iter().map(|i| i.id).collect::<Vec<_>>(), vec![second.id, first.id]);

    let contacted = desk.update_status(&session, first.id, InquiryStatus::Contacted).await.unwrap();
    assert_eq!(contacted.status, InquiryStatus::Contacted);
    assert!(contacted.updated_at >= contacted.created_at);

    let new_only = desk.list(Some(InquiryStatus::New)).await.unwrap();
    assert_eq!(new_only.len(), 1);
    assert_eq!(new_only[0].id, second.id);
    assert!(desk.list(Some(InquiryStatus::Closed)).await.unwrap().is_empty());

    let missing = desk.update_status(&session, Uuid::new_v4(), InquiryStatus::Closed).await;
    assert!(matches!(missing, Err(BackofficeError::NotFound { resource: "inquiry", .. })));
}
