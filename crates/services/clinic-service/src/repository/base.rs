//! Shared plumbing for the SeaORM stores.
//!
//! Stores are generic over a [`DbHandle`] so the same code runs against the
//! pooled connection or inside a transaction opened by the unit of work.

use std::sync::Arc;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IntoActiveModel, PrimaryKeyTrait, QueryFilter,
};
use uuid::Uuid;

use common::{AppError, AppResult};

/// Something a store can run queries on.
pub trait DbHandle: Clone + Send + Sync + 'static {
    type Conn: ConnectionTrait + Send + Sync;

    fn conn(&self) -> &Self::Conn;
}

impl DbHandle for DatabaseConnection {
    type Conn = DatabaseConnection;

    fn conn(&self) -> &Self::Conn {
        self
    }
}

impl DbHandle for Arc<DatabaseTransaction> {
    type Conn = DatabaseTransaction;

    fn conn(&self) -> &Self::Conn {
        self.as_ref()
    }
}

/// Find a row by primary key and map it into a domain type.
pub(crate) async fn find_by_id<E, T, C>(db: &C, id: Uuid) -> AppResult<Option<T>>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    T: From<E::Model>,
    C: ConnectionTrait,
{
    let model = E::find_by_id(id).one(db).await?;
    Ok(model.map(T::from))
}

/// Load every row of a table.
pub(crate) async fn find_all<E, T, C>(db: &C) -> AppResult<Vec<T>>
where
    E: EntityTrait,
    T: From<E::Model>,
    C: ConnectionTrait,
{
    let models = E::find().all(db).await?;
    Ok(models.into_iter().map(T::from).collect())
}

/// Insert a new row built from a domain value.
pub(crate) async fn insert<A, T, C>(db: &C, model: A) -> AppResult<T>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    T: From<<A::Entity as EntityTrait>::Model>,
    C: ConnectionTrait,
{
    let model = model.insert(db).await?;
    Ok(T::from(model))
}

/// Overwrite an existing row. A missing row surfaces as not-found.
pub(crate) async fn update<A, T, C>(db: &C, model: A) -> AppResult<T>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    T: From<<A::Entity as EntityTrait>::Model>,
    C: ConnectionTrait,
{
    let model = model.update(db).await?;
    Ok(T::from(model))
}

/// Hard delete by primary key.
pub(crate) async fn delete_by_id<E, C>(db: &C, id: Uuid, not_found: &str) -> AppResult<()>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    C: ConnectionTrait,
{
    let result = E::delete_by_id(id).exec(db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found(not_found));
    }

    Ok(())
}

/// Stamp a row's `user_id` column. Used when linking an account to a record.
///
/// Only rows without an account are touched, so two registrations racing for
/// the same record cannot replace each other's link.
pub(crate) async fn set_user_id<E, C>(
    db: &C,
    id_column: E::Column,
    user_column: E::Column,
    entity_id: Uuid,
    user_id: Uuid,
    not_found: &str,
) -> AppResult<()>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let result = E::update_many()
        .col_expr(user_column, Expr::value(user_id))
        .filter(id_column.eq(entity_id))
        .filter(user_column.is_null())
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        let exists = E::find()
            .filter(id_column.eq(entity_id))
            .one(db)
            .await?
            .is_some();

        return Err(if exists {
            AppError::conflict("El registro ya tiene una cuenta de usuario asociada")
        } else {
            AppError::not_found(not_found)
        });
    }

    Ok(())
}
