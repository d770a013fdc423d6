//! Admin writes against a scripted backend: method, path, bearer header,
//! body field names and decoded results.

mod common;

use chrono::NaiveDate;
use common::*;
use hisi_client::ClientError;
use hisi_core::catalog::ProductDraft;
use hisi_core::content::{
    Collaboration, MediaKitConfig, MediaKitItem, PressContact, PressHero, PressRelease,
    SectionContent, SectionValueUpdate, SpeakingEngagement,
};
use http::Method;
use serde_json::json;

const BEARER: &str = "Bearer token-abc";

fn engagement() -> SpeakingEngagement {
    SpeakingEngagement {
        id: None,
        title: "Designing for Every Body".into(),
        event: "Nairobi Design Week".into(),
        location: "Nairobi".into(),
        date: NaiveDate::from_ymd_opt(2024, 9, 12).unwrap(),
        description: None,
        engagement_type: "Keynote".into(),
        is_published: true,
        display_order: 1,
    }
}

fn kit_item(name: &str, file_type: &str) -> MediaKitItem {
    MediaKitItem {
        id: None,
        name: name.into(),
        file_type: file_type.into(),
        size: Some("2.5 MB".into()),
        url: Some("/media/brand-guide.zip".into()),
        display_order: 0,
    }
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_create_product() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "super_admin");

    transport.respond(201, json!({"product": product_json("p-7", "Seated Trouser", 3999.0)}));
    let draft = ProductDraft {
        name: Some("Seated Trouser".into()),
        slug: Some("seated-trouser".into()),
        sku: Some("HS-ST-001".into()),
        price: Some(3999.0),
        is_featured: Some(true),
        ..ProductDraft::default()
    };
    let product = client.products().create(&draft).await.unwrap();

    assert_eq!(product.id, "p-7");
    let request = transport.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url.path(), "/api/v1/products");
    assert_eq!(request.header("authorization"), Some(BEARER));
    assert_eq!(
        request.json_body().unwrap(),
        json!({
            "name": "Seated Trouser",
            "slug": "seated-trouser",
            "sku": "HS-ST-001",
            "price": 3999.0,
            "is_featured": true
        })
    );
}

#[tokio::test]
async fn test_create_product_requires_sku() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "super_admin");

    let draft = ProductDraft {
        name: Some("Seated Trouser".into()),
        slug: Some("seated-trouser".into()),
        price: Some(3999.0),
        ..ProductDraft::default()
    };
    let err = client.products().create(&draft).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_update_and_delete_product() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "content_manager");

    transport.respond(200, json!({"product": product_json("p-1", "Magnetic Wrap Dress", 3999.0)}));
    let draft = ProductDraft {
        price: Some(3999.0),
        ..ProductDraft::default()
    };
    let product = client.products().update("p-1", &draft).await.unwrap();
    assert_eq!(product.price, 3999.0);

    let request = transport.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url.path(), "/api/v1/products/p-1");
    assert_eq!(request.header("authorization"), Some(BEARER));
    assert_eq!(request.json_body().unwrap(), json!({"price": 3999.0}));

    transport.respond(200, json!({"success": true}));
    let message = client.products().delete("p-1").await.unwrap();
    assert_eq!(message, "Product deleted successfully");

    let request = transport.last_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url.path(), "/api/v1/products/p-1");
    assert_eq!(request.header("authorization"), Some(BEARER));
}

#[tokio::test]
async fn test_product_writes_need_session() {
    let transport = ScriptedTransport::new();
    let client = client(&transport);

    let err = client.products().delete("p-1").await.unwrap_err();
    assert!(matches!(err, ClientError::AuthenticationRequired));
    assert_eq!(transport.request_count(), 0);
}

// =============================================================================
// Press collections
// =============================================================================

#[tokio::test]
async fn test_admin_create_speaking_engagement() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "content_manager");

    let mut stored = serde_json::to_value(engagement()).unwrap();
    stored["id"] = json!("se-1");
    transport.respond(201, envelope(stored));

    let created = client.press().admin_create(&engagement()).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("se-1"));
    assert_eq!(created.engagement_type, "Keynote");

    let request = transport.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url.path(), "/api/v1/admin/press/speaking-engagements");
    assert_eq!(request.header("authorization"), Some(BEARER));

    let body = request.json_body().unwrap();
    assert_eq!(body["type"], "Keynote");
    assert_eq!(body["date"], "2024-09-12");
    assert!(body.get("engagement_type").is_none());
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn test_admin_update_collaboration() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "super_admin");

    let collaboration = Collaboration {
        id: Some("co-1".into()),
        title: "Adaptive Denim".into(),
        partner: "Kitenge Works".into(),
        description: None,
        image: None,
        year: "2024".into(),
        is_published: false,
        display_order: 3,
    };
    transport.respond(200, envelope(serde_json::to_value(&collaboration).unwrap()));

    let updated = client.press().admin_update("co-1", &collaboration).await.unwrap();
    assert_eq!(updated, collaboration);

    let request = transport.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url.path(), "/api/v1/admin/press/collaborations/co-1");
    let body = request.json_body().unwrap();
    assert_eq!(body["partner"], "Kitenge Works");
    assert_eq!(body["year"], "2024");
    assert_eq!(body["is_published"], false);
}

#[tokio::test]
async fn test_admin_delete_release() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "content_manager");

    transport.respond(200, json!({"message": "Press release deleted"}));
    let message = client.press().admin_delete::<PressRelease>("pr-1").await.unwrap();
    assert_eq!(message, "Press release deleted");

    transport.respond(200, json!({}));
    let message = client.press().admin_delete::<PressRelease>("pr-2").await.unwrap();
    assert_eq!(message, "Deleted");

    let request = transport.last_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url.path(), "/api/v1/admin/press/releases/pr-2");
    assert_eq!(request.header("authorization"), Some(BEARER));
}

#[tokio::test]
async fn test_admin_create_surfaces_backend_message() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "content_manager");

    transport.respond(400, json!({"error": "Date is required"}));
    let err = client.press().admin_create(&engagement()).await.unwrap_err();
    assert_eq!(err.user_message(), "Date is required");

    transport.respond(500, json!({}));
    let err = client.press().admin_create(&engagement()).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to create speaking engagement");
}

#[tokio::test]
async fn test_admin_create_needs_session() {
    let transport = ScriptedTransport::new();
    let client = client(&transport);

    let err = client.press().admin_create(&engagement()).await.unwrap_err();
    assert!(matches!(err, ClientError::AuthenticationRequired));
    assert_eq!(transport.request_count(), 0);
}

// =============================================================================
// Press singletons
// =============================================================================

#[tokio::test]
async fn test_hero_read_and_update() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "content_manager");

    transport.respond(200, envelope(json!(null)));
    assert_eq!(client.press().hero().await.unwrap(), None);
    let request = transport.last_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url.path(), "/api/v1/admin/press/hero");
    assert_eq!(request.header("authorization"), Some(BEARER));

    let hero = PressHero {
        title: "Hisi in the Press".into(),
        subtitle: Some("Adaptive fashion, made in Nairobi".into()),
        ..PressHero::default()
    };
    transport.respond(200, envelope(json!({"id": "h-1", "title": "Hisi in the Press"})));
    let saved = client.press().update_hero(&hero).await.unwrap();
    assert_eq!(saved.id.as_deref(), Some("h-1"));

    let request = transport.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url.path(), "/api/v1/admin/press/hero");
    let body = request.json_body().unwrap();
    assert_eq!(body["title"], "Hisi in the Press");
    assert_eq!(body["subtitle"], "Adaptive fashion, made in Nairobi");
    assert!(body.get("id").is_none());
    assert!(body.get("updated_at").is_none());
}

#[tokio::test]
async fn test_press_contact_read_and_update() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "super_admin");

    transport.respond(
        200,
        envelope(json!({"id": "pc-1", "title": "Media Inquiries", "email": "press@hisistudio.com"})),
    );
    let contact = client.press().contact().await.unwrap().unwrap();
    assert_eq!(contact.email.as_deref(), Some("press@hisistudio.com"));
    assert_eq!(transport.last_request().url.path(), "/api/v1/admin/press/contact");

    let update = PressContact {
        phone: Some("+254700123456".into()),
        ..contact
    };
    transport.respond(200, envelope(serde_json::to_value(&update).unwrap()));
    let saved = client.press().update_contact(&update).await.unwrap();
    assert_eq!(saved.phone.as_deref(), Some("+254700123456"));

    let request = transport.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url.path(), "/api/v1/admin/press/contact");
    assert_eq!(request.header("authorization"), Some(BEARER));
    let body = request.json_body().unwrap();
    assert_eq!(body["id"], "pc-1");
    assert_eq!(body["phone"], "+254700123456");
}

// =============================================================================
// Media kit
// =============================================================================

#[tokio::test]
async fn test_media_kit_read() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "content_manager");

    transport.respond(
        200,
        envelope(json!({
            "config": {"id": "mk", "title": "Media Kit", "description": null},
            "items": [{"id": "mi-1", "name": "Brand Guide", "type": "ZIP", "size": "12 MB"}]
        })),
    );
    let kit = client.press().media_kit().await.unwrap();

    assert_eq!(kit.config.unwrap().title, "Media Kit");
    assert_eq!(kit.items[0].file_type, "ZIP");
    assert_eq!(transport.last_request().url.path(), "/api/v1/admin/press/media-kit");
}

#[tokio::test]
async fn test_media_kit_writes() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "content_manager");
    let press = client.press();

    let config = MediaKitConfig {
        title: "Press Kit".into(),
        description: Some("Logos and lookbooks".into()),
        ..MediaKitConfig::default()
    };
    transport.respond(200, envelope(json!({"id": "mk", "title": "Press Kit"})));
    let saved = press.update_media_kit_config(&config).await.unwrap();
    assert_eq!(saved.id.as_deref(), Some("mk"));
    let request = transport.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url.path(), "/api/v1/admin/press/media-kit/config");
    assert_eq!(
        request.json_body().unwrap(),
        json!({"title": "Press Kit", "description": "Logos and lookbooks"})
    );

    transport.respond(201, envelope(json!({"id": "mi-2", "name": "Lookbook", "type": "PDF"})));
    let created = press.create_media_kit_item(&kit_item("Lookbook", "PDF")).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("mi-2"));
    let request = transport.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url.path(), "/api/v1/admin/press/media-kit/items");
    let body = request.json_body().unwrap();
    assert_eq!(body["type"], "PDF");
    assert_eq!(body["size"], "2.5 MB");
    assert!(body.get("file_type").is_none());

    transport.respond(200, envelope(json!({"id": "mi-2", "name": "Lookbook 2024", "type": "ZIP"})));
    let updated = press
        .update_media_kit_item("mi-2", &kit_item("Lookbook 2024", "ZIP"))
        .await
        .unwrap();
    assert_eq!(updated.file_type, "ZIP");
    let request = transport.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url.path(), "/api/v1/admin/press/media-kit/items/mi-2");

    transport.respond(200, json!({"message": "Media kit item deleted"}));
    let message = press.delete_media_kit_item("mi-2").await.unwrap();
    assert_eq!(message, "Media kit item deleted");
    let request = transport.last_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url.path(), "/api/v1/admin/press/media-kit/items/mi-2");
    assert_eq!(request.header("authorization"), Some(BEARER));
}

// =============================================================================
// Section content
// =============================================================================

#[tokio::test]
async fn test_create_section() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "content_manager");

    let item = SectionContent::new("home", "hero", "title", json!("Fashion for every body"));
    let mut stored = serde_json::to_value(&item).unwrap();
    stored["id"] = json!("s-1");
    transport.respond(201, envelope(stored));

    let created = client.cms().create_section(&item).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("s-1"));

    let request = transport.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url.path(), "/api/v1/admin/section-content");
    assert_eq!(request.header("authorization"), Some(BEARER));
    let body = request.json_body().unwrap();
    assert_eq!(body["page_name"], "home");
    assert_eq!(body["section_name"], "hero");
    assert_eq!(body["content_key"], "title");
    assert_eq!(body["content_value"], "Fashion for every body");
    assert_eq!(body["content_type"], "text");
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn test_create_section_requires_key() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "content_manager");

    let item = SectionContent::new("home", "hero", " ", json!("x"));
    let err = client.cms().create_section(&item).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_update_section() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "super_admin");

    let mut item = SectionContent::new("about", "story", "image", json!("/img/studio.jpg"));
    item.content_type = "image".into();
    let mut stored = serde_json::to_value(&item).unwrap();
    stored["id"] = json!("s-9");
    transport.respond(200, envelope(stored));

    let updated = client.cms().update_section("s-9", &item).await.unwrap();
    assert_eq!(updated.content_type, "image");

    let request = transport.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url.path(), "/api/v1/admin/section-content/s-9");
    assert_eq!(request.json_body().unwrap()["content_value"], "/img/studio.jpg");
}

#[tokio::test]
async fn test_bulk_update_sections() {
    let transport = ScriptedTransport::new();
    let client = signed_in_client(&transport, "content_manager");

    transport.respond(200, envelope(json!({"updated_count": 2})));
    let items = [
        SectionValueUpdate {
            id: "s-1".into(),
            content_value: json!("Shop now"),
        },
        SectionValueUpdate {
            id: "s-2".into(),
            content_value: json!(["wheelchair", "seated"]),
        },
    ];
    let result = client.cms().bulk_update_sections(&items).await.unwrap();
    assert_eq!(result.updated_count, 2);

    let request = transport.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url.path(), "/api/v1/admin/section-content/bulk");
    assert_eq!(request.header("authorization"), Some(BEARER));
    assert_eq!(
        request.json_body().unwrap(),
        json!({"items": [
            {"id": "s-1", "content_value": "Shop now"},
            {"id": "s-2", "content_value": ["wheelchair", "seated"]}
        ]})
    );
}
