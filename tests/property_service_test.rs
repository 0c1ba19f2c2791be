//! Imóveis: galeria ordenada, contador de visualizações e auditoria.

mod common;

use imobiliaria_backend::{
    common::{error::AppError, pagination::Pagination},
    models::property::{CreatePropertyPayload, PropertyPatch},
};

fn property_input(titulo: &str, preco: Option<&str>) -> CreatePropertyPayload {
    serde_json::from_value(serde_json::json!({
        "titulo": titulo,
        "preco": preco,
        "localizacao": "Setor Central, Rio Verde",
        "quartos": 3,
        "images": [
            { "image_url": "https://cdn/b.jpg", "ordem": 2 },
            { "image_url": "https://cdn/a.jpg", "thumb_url": "https://cdn/a_t.jpg", "ordem": 1 }
        ]
    }))
    .unwrap()
}

async fn audit_actions(pool: &sqlx::SqlitePool) -> Vec<String> {
    sqlx::query_scalar::<_, String>("SELECT acao FROM audit_logs ORDER BY id")
        .fetch_all(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn create_orders_gallery_and_audits() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;

    let property = state
        .property_service
        .create(&admin, &property_input("Casa Jardim", Some("450000")))
        .await
        .unwrap();

    assert_eq!(property.status, "ATIVO");
    assert_eq!(property.views_count, 0);
    let urls: Vec<_> = property.images.iter().map(|i| i.image_url.as_str()).collect();
    assert_eq!(urls, ["https://cdn/a.jpg", "https://cdn/b.jpg"]);

    assert_eq!(audit_actions(&state.db_pool).await, ["CREATE_PROPERTY"]);
}

#[tokio::test]
async fn each_detail_read_counts_a_view() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let property = state
        .property_service
        .create(&admin, &property_input("Apartamento", None))
        .await
        .unwrap();

    state.property_service.get(property.id).await.unwrap();
    let read = state.property_service.get(property.id).await.unwrap();

    assert_eq!(read.views_count, 2);
    let events = common::count(&state.db_pool, "SELECT COUNT(*) FROM property_analytics").await;
    assert_eq!(events, 2);
}

#[tokio::test]
async fn reading_missing_property_records_nothing() {
    let state = common::setup().await;

    let err = state.property_service.get(77).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    let events = common::count(&state.db_pool, "SELECT COUNT(*) FROM property_analytics").await;
    assert_eq!(events, 0);
}

#[tokio::test]
async fn price_change_writes_exactly_one_price_entry() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let property = state
        .property_service
        .create(&admin, &property_input("Sobrado", Some("300000")))
        .await
        .unwrap();

    let patch: PropertyPatch =
        serde_json::from_str(r#"{"preco": "320000", "descricao": "Reformado"}"#).unwrap();
    let updated = state.property_service.update(&admin, property.id, patch).await.unwrap();

    assert_eq!(updated.preco.as_deref(), Some("320000"));
    assert_eq!(updated.descricao.as_deref(), Some("Reformado"));
    assert_eq!(
        audit_actions(&state.db_pool).await,
        ["CREATE_PROPERTY", "UPDATE_PRICE"]
    );

    let detalhes: String =
        sqlx::query_scalar("SELECT detalhes FROM audit_logs WHERE acao = 'UPDATE_PRICE'")
            .fetch_one(&state.db_pool)
            .await
            .unwrap();
    assert_eq!(detalhes, "Preço alterado de 300000 para 320000");
}

#[tokio::test]
async fn other_changes_write_generic_entry() {
    let state = common::setup().await;
    let vendedor = common::vendedor(&state, "ana@crm.com").await;
    let property = state
        .property_service
        .create(&vendedor, &property_input("Kitnet", Some("900")))
        .await
        .unwrap();

    let patch: PropertyPatch = serde_json::from_str(r#"{"preco": "900", "quartos": 1}"#).unwrap();
    let updated = state.property_service.update(&vendedor, property.id, patch).await.unwrap();

    assert_eq!(updated.quartos, 1);
    assert_eq!(
        audit_actions(&state.db_pool).await,
        ["CREATE_PROPERTY", "UPDATE_PROPERTY"]
    );
}

#[tokio::test]
async fn images_field_replaces_gallery_only_when_present() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let property = state
        .property_service
        .create(&admin, &property_input("Chácara", None))
        .await
        .unwrap();

    // Ausente: galeria intocada
    let patch: PropertyPatch = serde_json::from_str(r#"{"tipo": "Rural"}"#).unwrap();
    let updated = state.property_service.update(&admin, property.id, patch).await.unwrap();
    assert_eq!(updated.images.len(), 2);

    // Lista nova: substitui tudo
    let patch: PropertyPatch =
        serde_json::from_str(r#"{"images": [{"image_url": "https://cdn/c.jpg"}]}"#).unwrap();
    let updated = state.property_service.update(&admin, property.id, patch).await.unwrap();
    assert_eq!(updated.images.len(), 1);
    assert_eq!(updated.images[0].image_url, "https://cdn/c.jpg");
    assert_eq!(updated.images[0].ordem, 0);

    // Lista vazia: remove todas
    let patch: PropertyPatch = serde_json::from_str(r#"{"images": []}"#).unwrap();
    let updated = state.property_service.update(&admin, property.id, patch).await.unwrap();
    assert!(updated.images.is_empty());
}

#[tokio::test]
async fn update_missing_property_is_not_found() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;

    let err = state
        .property_service
        .update(&admin, 999, PropertyPatch::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(audit_actions(&state.db_pool).await.is_empty());
}

#[tokio::test]
async fn vendedor_cannot_delete_even_missing_property() {
    let state = common::setup().await;
    let vendedor = common::vendedor(&state, "ana@crm.com").await;

    let err = state.property_service.delete(&vendedor, 12345).await.unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn admin_delete_cascades_images_and_audits() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let property = state
        .property_service
        .create(&admin, &property_input("Galpão", None))
        .await
        .unwrap();

    state.property_service.delete(&admin, property.id).await.unwrap();

    assert_eq!(common::count(&state.db_pool, "SELECT COUNT(*) FROM properties").await, 0);
    assert_eq!(common::count(&state.db_pool, "SELECT COUNT(*) FROM property_images").await, 0);
    assert_eq!(
        audit_actions(&state.db_pool).await,
        ["CREATE_PROPERTY", "DELETE_PROPERTY"]
    );

    let err = state.property_service.delete(&admin, property.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn search_matches_title_or_location_case_insensitively() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    state
        .property_service
        .create(&admin, &property_input("Casa no Lago", None))
        .await
        .unwrap();
    let mut other = property_input("Loja 100% comercial", None);
    other.localizacao = Some("Bairro Industrial".into());
    state.property_service.create(&admin, &other).await.unwrap();

    let found = state
        .property_service
        .search(Some("LAGO"), Pagination::default())
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].titulo, "Casa no Lago");
    assert_eq!(found[0].images.len(), 2);

    let by_location = state
        .property_service
        .search(Some("industrial"), Pagination::default())
        .await
        .unwrap();
    assert_eq!(by_location.len(), 1);

    // '%' é literal, não curinga
    let literal = state
        .property_service
        .search(Some("100%"), Pagination::default())
        .await
        .unwrap();
    assert_eq!(literal.len(), 1);
    let wildcard = state
        .property_service
        .search(Some("%"), Pagination::default())
        .await
        .unwrap();
    assert_eq!(wildcard.len(), 1);

    let all = state
        .property_service
        .search(None, Pagination::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn gallery_ties_keep_insertion_order() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let mut input = property_input("Sobrado", None);
    input.images = serde_json::from_value(serde_json::json!([
        { "image_url": "https://cdn/sala.jpg", "ordem": 1 },
        { "image_url": "https://cdn/fachada.jpg" },
        { "image_url": "https://cdn/cozinha.jpg", "ordem": 1 },
        { "image_url": "https://cdn/quarto.jpg", "ordem": 1 },
        { "image_url": "https://cdn/garagem.jpg", "ordem": 0 }
    ]))
    .unwrap();

    let created = state.property_service.create(&admin, &input).await.unwrap();
    let read = state.property_service.get(created.id).await.unwrap();

    let expected = [
        "https://cdn/fachada.jpg",
        "https://cdn/garagem.jpg",
        "https://cdn/sala.jpg",
        "https://cdn/cozinha.jpg",
        "https://cdn/quarto.jpg",
    ];
    for property in [&created, &read] {
        let urls: Vec<_> = property.images.iter().map(|i| i.image_url.as_str()).collect();
        assert_eq!(urls, expected);
    }
}

#[tokio::test]
async fn paged_search_keeps_insertion_order() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    for i in 0..6 {
        let mut input = property_input(&format!("Casa {i}"), None);
        if i % 2 == 1 {
            input.localizacao = Some("Zona Rural".into());
        }
        state.property_service.create(&admin, &input).await.unwrap();
    }

    let page = state
        .property_service
        .search(None, Pagination::new(2, 3))
        .await
        .unwrap();
    let titles: Vec<_> = page.iter().map(|p| p.titulo.as_str()).collect();
    assert_eq!(titles, ["Casa 2", "Casa 3", "Casa 4"]);

    // A janela se aplica depois do filtro
    let rural = state
        .property_service
        .search(Some("rural"), Pagination::new(1, 2))
        .await
        .unwrap();
    let titles: Vec<_> = rural.iter().map(|p| p.titulo.as_str()).collect();
    assert_eq!(titles, ["Casa 3", "Casa 5"]);
    assert!(rural.iter().all(|p| p.images.len() == 2));
}

#[tokio::test]
async fn search_folds_case_for_ascii_letters_only() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let mut input = property_input("Apartamento", None);
    input.localizacao = Some("Setor Bueno, Goiânia".into());
    state.property_service.create(&admin, &input).await.unwrap();

    let lower = state
        .property_service
        .search(Some("goiânia"), Pagination::default())
        .await
        .unwrap();
    assert_eq!(lower.len(), 1);

    // Só letras ASCII mudam de caixa na comparação
    let upper = state
        .property_service
        .search(Some("GOIÂNIA"), Pagination::default())
        .await
        .unwrap();
    assert!(upper.is_empty());
}
