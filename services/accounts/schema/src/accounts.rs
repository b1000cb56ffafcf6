use sea_orm::entity::prelude::*;

/// Account record owned by the accounts service.
///
/// One table holds all three role variants; `role` discriminates.
/// Employee rows use `salary` and `owner_id`; company-owner rows use
/// `company_name` and `employee_ids` (a JSON array of account ids). The
/// two link columns are independent relations reconciled by the domain
/// invariant check.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    #[sea_orm(unique)]
    pub external_id: Option<String>,
    pub role: i16,
    pub salary: Option<f64>,
    pub owner_id: Option<Uuid>,
    pub company_name: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub employee_ids: Option<Json>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
