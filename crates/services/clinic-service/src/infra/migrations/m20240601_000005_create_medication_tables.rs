//! Migration: medications, department stock, usage records and warehouse requests.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Medications::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Medications::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Medications::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Medications::Batch).string_len(50).not_null())
                    .col(ColumnDef::new(Medications::ExpirationDate).date().not_null())
                    .col(
                        ColumnDef::new(Medications::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockDepartments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockDepartments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StockDepartments::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(StockDepartments::MedicationId).uuid().not_null())
                    .col(ColumnDef::new(StockDepartments::Quantity).integer().not_null())
                    .col(ColumnDef::new(StockDepartments::MinQuantity).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_departments_department")
                            .from(StockDepartments::Table, StockDepartments::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_departments_medication")
                            .from(StockDepartments::Table, StockDepartments::MedicationId)
                            .to(Medications::Table, Medications::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_departments_department_medication")
                    .table(StockDepartments::Table)
                    .col(StockDepartments::DepartmentId)
                    .col(StockDepartments::MedicationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(usage_table(
                MedicationDerivations::Table,
                UsageParent::ConsultationDerivationId,
                ConsultationDerivations::Table,
                "medication_derivations",
            ))
            .await?;

        manager
            .create_table(usage_table(
                MedicationReferrals::Table,
                UsageParent::ConsultationReferralId,
                ConsultationReferrals::Table,
                "medication_referrals",
            ))
            .await?;

        manager
            .create_table(usage_table(
                MedicationEmergencies::Table,
                UsageParent::EmergencyRoomCareId,
                EmergencyRoomCares::Table,
                "medication_emergencies",
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WarehouseRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WarehouseRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WarehouseRequests::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(WarehouseRequests::RequestDate).date().not_null())
                    .col(ColumnDef::new(WarehouseRequests::Status).string_len(50).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_warehouse_requests_department")
                            .from(WarehouseRequests::Table, WarehouseRequests::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MedicationRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MedicationRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MedicationRequests::WarehouseRequestId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MedicationRequests::MedicationId).uuid().not_null())
                    .col(ColumnDef::new(MedicationRequests::Quantity).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medication_requests_request")
                            .from(MedicationRequests::Table, MedicationRequests::WarehouseRequestId)
                            .to(WarehouseRequests::Table, WarehouseRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medication_requests_medication")
                            .from(MedicationRequests::Table, MedicationRequests::MedicationId)
                            .to(Medications::Table, Medications::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MedicationRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WarehouseRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MedicationEmergencies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MedicationReferrals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MedicationDerivations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StockDepartments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Medications::Table).to_owned())
            .await
    }
}

/// A usage table: medication and quantity hanging off a clinical record.
/// Usage rows go away with their parent record.
fn usage_table<T, P>(
    table: T,
    parent_column: UsageParent,
    parent: P,
    name: &str,
) -> TableCreateStatement
where
    T: IntoIden + 'static,
    P: IntoIden + 'static,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(Usage::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(parent_column).uuid().not_null())
        .col(ColumnDef::new(Usage::MedicationId).uuid().not_null())
        .col(ColumnDef::new(Usage::Quantity).integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_record"))
                .from_col(parent_column)
                .to_tbl(parent)
                .to_col(Usage::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_medication"))
                .from_col(Usage::MedicationId)
                .to(Medications::Table, Medications::Id)
                .on_delete(ForeignKeyAction::Restrict),
        )
        .to_owned()
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
}

#[derive(Iden)]
enum ConsultationDerivations {
    Table,
}

#[derive(Iden)]
enum ConsultationReferrals {
    Table,
}

#[derive(Iden)]
enum EmergencyRoomCares {
    Table,
}

#[derive(Iden)]
enum Medications {
    Table,
    Id,
    Name,
    Batch,
    ExpirationDate,
    Quantity,
}

#[derive(Iden)]
enum StockDepartments {
    Table,
    Id,
    DepartmentId,
    MedicationId,
    Quantity,
    MinQuantity,
}

#[derive(Iden)]
enum Usage {
    Id,
    MedicationId,
    Quantity,
}

#[derive(Iden, Clone, Copy)]
enum UsageParent {
    ConsultationDerivationId,
    ConsultationReferralId,
    EmergencyRoomCareId,
}

#[derive(Iden)]
enum MedicationDerivations {
    Table,
}

#[derive(Iden)]
enum MedicationReferrals {
    Table,
}

#[derive(Iden)]
enum MedicationEmergencies {
    Table,
}

#[derive(Iden)]
enum WarehouseRequests {
    Table,
    Id,
    DepartmentId,
    RequestDate,
    Status,
}

#[derive(Iden)]
enum MedicationRequests {
    Table,
    Id,
    WarehouseRequestId,
    MedicationId,
    Quantity,
}
