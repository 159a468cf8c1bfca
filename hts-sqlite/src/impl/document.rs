use crate::{Db, types::DocumentId};
use hts_core::{
    models::{Entity, Resource, SortKey, StoreQuery},
    ports::DocumentRepository,
};
use sqlx::{QueryBuilder, Row as _, Sqlite, types::Json};

impl<DocumentData: Send + Unpin + 'static + serde::Serialize + serde::de::DeserializeOwned>
    DocumentRepository<DocumentData> for Db
{
    async fn count_documents(&self, resource: Resource) -> Result<u64, Self::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            select
                count(*)
            from
                document
            where
                resource = $1
            "#,
        )
        .bind(resource.as_str())
        .fetch_one(&self.reader)
        .await?;

        Ok(count.max(0) as u64)
    }

    async fn query_documents(
        &self,
        resource: Resource,
        query: &StoreQuery,
    ) -> Result<Vec<(DocumentData, Self::DocumentId)>, Self::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "select id, json(data) as data from document where resource = ",
        );
        builder.push_bind(resource.as_str());

        // Timestamps compare on their date prefix, so `2024-01-31T23:00:00Z`
        // is inside a range ending on 2024-01-31
        if let Some(filter) = &query.range {
            builder
                .push(" and substr(json_extract(data, ")
                .push_bind(json_path(&filter.field))
                .push("), 1, 10) between ")
                .push_bind(filter.range.start_string())
                .push(" and ")
                .push_bind(filter.range.end_string());
        }

        builder.push(" order by ");
        for key in &query.order_by {
            push_sort_key(&mut builder, key);
            builder.push(", ");
        }
        // rowid is insertion order, which makes the natural order (and ties) stable
        builder
            .push("rowid limit ")
            .push_bind(to_i64(query.limit))
            .push(" offset ")
            .push_bind(to_i64(query.offset));

        let rows = builder.build().fetch_all(&self.reader).await?;

        rows.into_iter()
            .map(|row| {
                let Json(data) = row.try_get::<Json<DocumentData>, _>("data")?;
                let id = row.try_get::<DocumentId, _>("id")?;
                Ok((data, id))
            })
            .collect()
    }

    async fn create_document(
        &self,
        resource: Resource,
        document_id: Self::DocumentId,
        data: DocumentData,
        as_of: Self::DateTime,
    ) -> Result<Entity<Self::DocumentId, DocumentData>, Self::Error> {
        let body = document_body(&data)?;
        let Json(data) = sqlx::query_scalar::<_, Json<DocumentData>>(
            r#"
            insert into
                document (resource, id, data, created_at, updated_at)
            values
                ($1, $2, jsonb($3), $4, $4)
            returning
                json(data)
            "#,
        )
        .bind(resource.as_str())
        .bind(document_id)
        .bind(body)
        .bind(as_of)
        .fetch_one(&self.writer)
        .await?;

        Ok(Entity {
            id: document_id,
            data,
        })
    }

    async fn get_document(
        &self,
        resource: Resource,
        document_id: Self::DocumentId,
    ) -> Result<Option<Entity<Self::DocumentId, DocumentData>>, Self::Error> {
        let data = sqlx::query_scalar::<_, Json<DocumentData>>(
            r#"
            select
                json(data)
            from
                document
            where
                resource = $1
            and
                id = $2
            "#,
        )
        .bind(resource.as_str())
        .bind(document_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(data.map(|Json(data)| Entity {
            id: document_id,
            data,
        }))
    }

    async fn update_document(
        &self,
        resource: Resource,
        document_id: Self::DocumentId,
        data: DocumentData,
        as_of: Self::DateTime,
    ) -> Result<Option<Entity<Self::DocumentId, DocumentData>>, Self::Error> {
        let body = document_body(&data)?;
        let data = sqlx::query_scalar::<_, Json<DocumentData>>(
            r#"
            update
                document
            set
                data = jsonb($3),
                updated_at = $4
            where
                resource = $1
            and
                id = $2
            returning
                json(data)
            "#,
        )
        .bind(resource.as_str())
        .bind(document_id)
        .bind(body)
        .bind(as_of)
        .fetch_optional(&self.writer)
        .await?;

        Ok(data.map(|Json(data)| Entity {
            id: document_id,
            data,
        }))
    }

    async fn delete_document(
        &self,
        resource: Resource,
        document_id: Self::DocumentId,
    ) -> Result<bool, Self::Error> {
        let result = sqlx::query(
            r#"
            delete from
                document
            where
                resource = $1
            and
                id = $2
            "#,
        )
        .bind(resource.as_str())
        .bind(document_id)
        .execute(&self.writer)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Serialize a document for storage, dropping any `id` key.
fn document_body<T: serde::Serialize>(data: &T) -> Result<Json<serde_json::Value>, sqlx::Error> {
    let mut value =
        serde_json::to_value(data).map_err(|err| sqlx::Error::Encode(Box::new(err)))?;
    if let Some(object) = value.as_object_mut() {
        object.remove("id");
    }
    Ok(Json(value))
}

fn push_sort_key(builder: &mut QueryBuilder<'_, Sqlite>, key: &SortKey) {
    match key.field.as_str() {
        "id" => builder.push("id"),
        field => builder
            .push("json_extract(data, ")
            .push_bind(json_path(field))
            .push(")"),
    };
    builder.push(" ").push(key.direction.as_str());
}

// The key is quoted so `.` and `[` in a field name are taken literally.
// SQLite has no escape for `"` inside a quoted key, so it is dropped.
fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', ""))
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_path() {
        assert_eq!(json_path("name"), r#"$."name""#);
        assert_eq!(json_path("a.b"), r#"$."a.b""#);
        assert_eq!(json_path(r#"we"ird"#), r#"$."weird""#);
    }

    #[test]
    fn test_document_body_drops_id() {
        let body = document_body(&serde_json::json!({ "id": 7, "name": "rash" })).unwrap();
        assert_eq!(body.0, serde_json::json!({ "name": "rash" }));
    }

    #[test]
    fn test_to_i64_saturates() {
        assert_eq!(to_i64(5), 5);
        assert_eq!(to_i64(u64::MAX), i64::MAX);
    }
}
