use sea_orm::entity::prelude::*;

/// A catalog product.
///
/// `img` and `name` are mandatory at creation time; `price` and `rating`
/// fall back to 0 when the admin surface omits them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// URL or path of the product image.
    pub img: String,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: Option<String>,
    pub rating: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItem,
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
