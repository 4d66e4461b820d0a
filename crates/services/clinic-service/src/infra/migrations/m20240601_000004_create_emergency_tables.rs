//! Migration: emergency room guard slots and the care given during them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmergencyRooms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EmergencyRooms::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(EmergencyRooms::DoctorId).uuid().not_null())
                    .col(ColumnDef::new(EmergencyRooms::GuardDate).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emergency_rooms_doctor")
                            .from(EmergencyRooms::Table, EmergencyRooms::DoctorId)
                            .to(Doctors::Table, Doctors::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One guard per doctor per day
        manager
            .create_index(
                Index::create()
                    .name("idx_emergency_rooms_doctor_date")
                    .table(EmergencyRooms::Table)
                    .col(EmergencyRooms::DoctorId)
                    .col(EmergencyRooms::GuardDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmergencyRoomCares::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmergencyRoomCares::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmergencyRoomCares::EmergencyRoomId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmergencyRoomCares::PatientId).uuid().not_null())
                    .col(ColumnDef::new(EmergencyRoomCares::CareDate).date_time().not_null())
                    .col(ColumnDef::new(EmergencyRoomCares::Diagnosis).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emergency_room_cares_room")
                            .from(EmergencyRoomCares::Table, EmergencyRoomCares::EmergencyRoomId)
                            .to(EmergencyRooms::Table, EmergencyRooms::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emergency_room_cares_patient")
                            .from(EmergencyRoomCares::Table, EmergencyRoomCares::PatientId)
                            .to(Patients::Table, Patients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmergencyRoomCares::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EmergencyRooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Doctors {
    Table,
    Id,
}

#[derive(Iden)]
enum Patients {
    Table,
    Id,
}

#[derive(Iden)]
enum EmergencyRooms {
    Table,
    Id,
    DoctorId,
    GuardDate,
}

#[derive(Iden)]
enum EmergencyRoomCares {
    Table,
    Id,
    EmergencyRoomId,
    PatientId,
    CareDate,
    Diagnosis,
}
