//! This file serves as the root for all SeaORM entity modules.
//! The data model is deliberately small: customers, catalog products,
//! and the cart rows that join the two.

pub mod cart_item;
pub mod product;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::cart_item::Entity as CartItem;
    pub use super::product::Entity as Product;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    fn test_user(username: &str, email: &str) -> user::ActiveModel {
        user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set("$argon2id$not-a-real-hash".to_string()),
            house_no: Set("12".to_string()),
            street: Set("Main Street".to_string()),
            city: Set("Springfield".to_string()),
            state: Set("IL".to_string()),
            pincode: Set("62704".to_string()),
            country: Set("USA".to_string()),
            phone: Set("555-0100".to_string()),
            is_active: Set(true),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let alice = test_user("alice", "alice@example.com").insert(&db).await?;
        let bob = test_user("bob", "bob@example.com").insert(&db).await?;

        let widget = product::ActiveModel {
            img: Set("widget.png".to_string()),
            name: Set("Widget".to_string()),
            price: Set(10.0),
            description: Set(Some("A widget".to_string())),
            category: Set(Some("tools".to_string())),
            rating: Set(4.5),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let gadget = product::ActiveModel {
            img: Set("gadget.png".to_string()),
            name: Set("Gadget".to_string()),
            price: Set(25.0),
            description: Set(None),
            category: Set(None),
            rating: Set(0.0),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        cart_item::ActiveModel {
            user_id: Set(alice.id),
            product_id: Set(widget.id),
            quantity: Set(2),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        cart_item::ActiveModel {
            user_id: Set(alice.id),
            product_id: Set(gadget.id),
            quantity: Set(1),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // The unique (user_id, product_id) index rejects a second row for
        // the same pair.
        let duplicate = cart_item::ActiveModel {
            user_id: Set(alice.id),
            product_id: Set(widget.id),
            quantity: Set(1),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(duplicate.is_err());

        // Cart rows join back to their products.
        let rows = CartItem::find()
            .filter(cart_item::Column::UserId.eq(alice.id))
            .find_also_related(Product)
            .all(&db)
            .await?;
        assert_eq!(rows.len(), 2);
        let widget_row = rows
            .iter()
            .find(|(item, _)| item.product_id == widget.id)
            .unwrap();
        assert_eq!(widget_row.0.quantity, 2);
        assert_eq!(widget_row.1.as_ref().unwrap().name, "Widget");

        // Deleting a user cascades to the user's cart rows.
        User::delete_by_id(alice.id).exec(&db).await?;
        let remaining = CartItem::find()
            .filter(cart_item::Column::UserId.eq(alice.id))
            .all(&db)
            .await?;
        assert!(remaining.is_empty());

        // Bob's (empty) cart and account are untouched.
        let users = User::find().all(&db).await?;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, bob.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_email_unique() -> Result<(), DbErr> {
        let db = setup_db().await?;

        test_user("carol", "carol@example.com").insert(&db).await?;
        let duplicate = test_user("carol2", "carol@example.com").insert(&db).await;
        assert!(duplicate.is_err());

        Ok(())
    }
}
