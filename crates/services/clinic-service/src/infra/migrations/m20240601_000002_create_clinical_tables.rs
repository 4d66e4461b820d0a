//! Migration: departments, external posts, patients and staff.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Departments::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Departments::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Departments::Description).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExternalMedicalPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExternalMedicalPosts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExternalMedicalPosts::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExternalMedicalPosts::Address)
                            .string_len(255)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Patients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Patients::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Patients::Identification)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Patients::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Patients::Age).integer().not_null())
                    .col(ColumnDef::new(Patients::Contact).string_len(100).not_null())
                    .col(ColumnDef::new(Patients::Address).string_len(255).not_null())
                    .col(ColumnDef::new(Patients::UserId).uuid().null().unique_key())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_patients_user")
                            .from(Patients::Table, Patients::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                employee_table(Doctors::Table, "doctors")
                    .col(ColumnDef::new(Doctors::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(Doctors::Specialty).string_len(100).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_doctors_department")
                            .from(Doctors::Table, Doctors::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                employee_table(Nurses::Table, "nurses")
                    .col(ColumnDef::new(Nurses::DepartmentId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_nurses_department")
                            .from(Nurses::Table, Nurses::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                employee_table(DepartmentHeads::Table, "department_heads")
                    .col(ColumnDef::new(DepartmentHeads::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(DepartmentHeads::AppointedOn).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_department_heads_department")
                            .from(DepartmentHeads::Table, DepartmentHeads::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                employee_table(WarehouseManagers::Table, "warehouse_managers")
                    .col(
                        ColumnDef::new(WarehouseManagers::Warehouse)
                            .string_len(100)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WarehouseManagers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DepartmentHeads::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Nurses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Doctors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Patients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExternalMedicalPosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await
    }
}

/// Columns every staff table shares.
fn employee_table<T: IntoIden + 'static>(table: T, name: &str) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(Employee::Id).uuid().not_null().primary_key())
        .col(
            ColumnDef::new(Employee::Identification)
                .string_len(20)
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(Employee::Name).string_len(100).not_null())
        .col(
            ColumnDef::new(Employee::Status)
                .string_len(20)
                .not_null()
                .default("active"),
        )
        .col(ColumnDef::new(Employee::UserId).uuid().null().unique_key())
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_user"))
                .from_col(Employee::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Employee {
    Id,
    Identification,
    Name,
    Status,
    UserId,
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
    Name,
    Description,
}

#[derive(Iden)]
enum ExternalMedicalPosts {
    Table,
    Id,
    Name,
    Address,
}

#[derive(Iden)]
enum Patients {
    Table,
    Id,
    Identification,
    Name,
    Age,
    Contact,
    Address,
    UserId,
}

#[derive(Iden)]
enum Doctors {
    Table,
    DepartmentId,
    Specialty,
}

#[derive(Iden)]
enum Nurses {
    Table,
    DepartmentId,
}

#[derive(Iden)]
enum DepartmentHeads {
    Table,
    DepartmentId,
    AppointedOn,
}

#[derive(Iden)]
enum WarehouseManagers {
    Table,
    Warehouse,
}
