use sea_orm::entity::prelude::*;

/// A registered shop customer.
///
/// The password is stored as an argon2 hash and must never be serialized
/// into an API response; handlers project this model into response types
/// that omit it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub house_no: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub phone: String,
    #[sea_orm(default_value = "true")]
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // A user owns any number of cart rows; they go away with the user.
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItem,
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
