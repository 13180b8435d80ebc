use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username))
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(string(Users::HouseNo))
                    .col(string(Users::Street))
                    .col(string(Users::City))
                    .col(string(Users::State))
                    .col(string(Users::Pincode))
                    .col(string(Users::Country))
                    .col(string(Users::Phone))
                    .col(boolean(Users::IsActive).default(true))
                    .to_owned(),
            )
            .await?;

        // Create products table
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string(Products::Img))
                    .col(string(Products::Name))
                    .col(double(Products::Price).default(0.0))
                    .col(string_null(Products::Description))
                    .col(string_null(Products::Category))
                    .col(double(Products::Rating).default(0.0))
                    .to_owned(),
            )
            .await?;

        // Create cart_items table
        manager
            .create_table(
                Table::create()
                    .table(CartItems::Table)
                    .if_not_exists()
                    .col(pk_auto(CartItems::Id))
                    .col(integer(CartItems::UserId))
                    .col(integer(CartItems::ProductId))
                    .col(integer(CartItems::Quantity))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_item_user")
                            .from(CartItems::Table, CartItems::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_item_product")
                            .from(CartItems::Table, CartItems::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One cart row per (user, product) pair; adds accumulate into it.
        manager
            .create_index(
                Index::create()
                    .name("idx_cart_items_user_product")
                    .table(CartItems::Table)
                    .col(CartItems::UserId)
                    .col(CartItems::ProductId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CartItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    HouseNo,
    Street,
    City,
    State,
    Pincode,
    Country,
    Phone,
    IsActive,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Img,
    Name,
    Price,
    Description,
    Category,
    Rating,
}

#[derive(DeriveIden)]
enum CartItems {
    Table,
    Id,
    UserId,
    ProductId,
    Quantity,
}
