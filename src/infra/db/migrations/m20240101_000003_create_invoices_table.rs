//! Migration: Create invoices table.
//!
//! `customer_id` is indexed but deliberately not a foreign key: the
//! customer reference is an opaque string.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Invoices::Id).string_len(64).not_null().primary_key())
                    .col(ColumnDef::new(Invoices::CustomerId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Invoices::Amount)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(Invoices::Amount).gt(0)),
                    )
                    .col(
                        ColumnDef::new(Invoices::Status)
                            .string_len(16)
                            .not_null()
                            .check(Expr::col(Invoices::Status).is_in(["pending", "paid"])),
                    )
                    .col(ColumnDef::new(Invoices::Date).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_customer_id")
                    .table(Invoices::Table)
                    .col(Invoices::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_status")
                    .table(Invoices::Table)
                    .col(Invoices::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Invoices {
    Table,
    Id,
    CustomerId,
    Amount,
    Status,
    Date,
}
