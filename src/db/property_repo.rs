// src/db/property_repo.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{Executor, QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    common::error::AppError,
    models::property::{CreatePropertyPayload, NewPropertyImage, Property, PropertyImage},
};

const PROPERTY_COLUMNS: &str = "id, titulo, descricao, preco, condominio, iptu, localizacao, tipo, \
    quartos, banheiros, vagas, area, status, video_url, main_image_url, thumb_image_url, \
    is_destaque, views_count, created_at, updated_at";

// Imóveis e a galeria de imagens (tabela filha com ON DELETE CASCADE)
#[derive(Clone, Default)]
pub struct PropertyRepository;

impl PropertyRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        input: &CreatePropertyPayload,
    ) -> Result<i64, AppError> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO properties (
                titulo, descricao, preco, condominio, iptu, localizacao, tipo,
                quartos, banheiros, vagas, area, status, video_url,
                main_image_url, thumb_image_url, is_destaque, views_count,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&input.titulo)
        .bind(&input.descricao)
        .bind(&input.preco)
        .bind(&input.condominio)
        .bind(&input.iptu)
        .bind(&input.localizacao)
        .bind(&input.tipo)
        .bind(input.quartos)
        .bind(input.banheiros)
        .bind(input.vagas)
        .bind(&input.area)
        .bind(&input.status)
        .bind(&input.video_url)
        .bind(&input.main_image_url)
        .bind(&input.thumb_image_url)
        .bind(input.is_destaque)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

        Ok(id)
    }

    /// Insere as imagens na ordem recebida; `ordem` ausente vira 0.
    pub async fn insert_images(
        &self,
        conn: &mut SqliteConnection,
        property_id: i64,
        images: &[NewPropertyImage],
    ) -> Result<(), AppError> {
        for image in images {
            sqlx::query(
                "INSERT INTO property_images (property_id, image_url, thumb_url, ordem) VALUES (?, ?, ?, ?)",
            )
            .bind(property_id)
            .bind(&image.image_url)
            .bind(&image.thumb_url)
            .bind(image.ordem())
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    pub async fn delete_images<'e, E>(&self, executor: E, property_id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM property_images WHERE property_id = ?")
            .bind(property_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn find_images<'e, E>(&self, executor: E, property_id: i64) -> Result<Vec<PropertyImage>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let images = sqlx::query_as::<_, PropertyImage>(
            r#"
            SELECT id, property_id, image_url, thumb_url, ordem
            FROM property_images
            WHERE property_id = ?
            ORDER BY ordem ASC, id ASC
            "#,
        )
        .bind(property_id)
        .fetch_all(executor)
        .await?;
        Ok(images)
    }

    /// Só a linha do imóvel, sem a galeria.
    pub async fn find_row<'e, E>(&self, executor: E, id: i64) -> Result<Option<Property>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let property = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(property)
    }

    pub async fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Property>, AppError> {
        let Some(mut property) = self.find_row(&mut *conn, id).await? else {
            return Ok(None);
        };
        property.images = self.find_images(&mut *conn, id).await?;
        Ok(Some(property))
    }

    // Grava todos os campos mutáveis do imóvel já mesclado
    pub async fn update<'e, E>(&self, executor: E, property: &Property) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            UPDATE properties SET
                titulo = ?, descricao = ?, preco = ?, condominio = ?, iptu = ?,
                localizacao = ?, tipo = ?, quartos = ?, banheiros = ?, vagas = ?,
                area = ?, status = ?, video_url = ?, main_image_url = ?,
                thumb_image_url = ?, is_destaque = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&property.titulo)
        .bind(&property.descricao)
        .bind(&property.preco)
        .bind(&property.condominio)
        .bind(&property.iptu)
        .bind(&property.localizacao)
        .bind(&property.tipo)
        .bind(property.quartos)
        .bind(property.banheiros)
        .bind(property.vagas)
        .bind(&property.area)
        .bind(&property.status)
        .bind(&property.video_url)
        .bind(&property.main_image_url)
        .bind(&property.thumb_image_url)
        .bind(property.is_destaque)
        .bind(Utc::now())
        .bind(property.id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Incremento atômico no banco. Devolve quantas linhas foram afetadas
    /// (0 quando o imóvel não existe).
    pub async fn increment_views<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE properties SET views_count = views_count + 1 WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn record_view<'e, E>(
        &self,
        executor: E,
        property_id: i64,
        at: DateTime<Utc>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT INTO property_analytics (property_id, timestamp) VALUES (?, ?)")
            .bind(property_id)
            .bind(at)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Busca por substring (sem diferenciar maiúsculas) em título ou
    /// localização, na ordem de inserção.
    pub async fn search(
        &self,
        conn: &mut SqliteConnection,
        query: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Property>, AppError> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {PROPERTY_COLUMNS} FROM properties"));

        if let Some(term) = query.map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", escape_like(term));
            // LIKE do SQLite só ignora caixa em ASCII: "GOIÂNIA" não casa "Goiânia"
            builder
                .push(" WHERE titulo LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR localizacao LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\'");
        }

        builder
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(skip);

        let mut properties = builder
            .build_query_as::<Property>()
            .fetch_all(&mut *conn)
            .await?;

        if properties.is_empty() {
            return Ok(properties);
        }

        // Uma consulta para as galerias da página inteira
        let mut images_query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, property_id, image_url, thumb_url, ordem FROM property_images WHERE property_id IN (",
        );
        let mut separated = images_query.separated(", ");
        for property in &properties {
            separated.push_bind(property.id);
        }
        separated.push_unseparated(") ORDER BY ordem ASC, id ASC");

        let images = images_query
            .build_query_as::<PropertyImage>()
            .fetch_all(&mut *conn)
            .await?;

        let mut by_property: HashMap<i64, Vec<PropertyImage>> = HashMap::new();
        for image in images {
            by_property.entry(image.property_id).or_default().push(image);
        }
        for property in &mut properties {
            property.images = by_property.remove(&property.id).unwrap_or_default();
        }

        Ok(properties)
    }
}

// `%` e `_` digitados pelo visitante são literais
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("Goiânia"), "Goiânia");
    }
}
