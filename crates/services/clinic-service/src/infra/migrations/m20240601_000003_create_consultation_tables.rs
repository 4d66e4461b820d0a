//! Migration: derivations, referrals and their consultations.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Derivations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Derivations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Derivations::PatientId).uuid().not_null())
                    .col(ColumnDef::new(Derivations::OriginDepartmentId).uuid().not_null())
                    .col(
                        ColumnDef::new(Derivations::DestinationDepartmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Derivations::DerivationDate).date().not_null())
                    .col(ColumnDef::new(Derivations::Reason).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_derivations_patient")
                            .from(Derivations::Table, Derivations::PatientId)
                            .to(Patients::Table, Patients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_derivations_origin")
                            .from(Derivations::Table, Derivations::OriginDepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_derivations_destination")
                            .from(Derivations::Table, Derivations::DestinationDepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Referrals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Referrals::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Referrals::PatientId).uuid().not_null())
                    .col(ColumnDef::new(Referrals::ExternalPostId).uuid().not_null())
                    .col(
                        ColumnDef::new(Referrals::DestinationDepartmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Referrals::ReferralDate).date().not_null())
                    .col(ColumnDef::new(Referrals::Reason).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_referrals_patient")
                            .from(Referrals::Table, Referrals::PatientId)
                            .to(Patients::Table, Patients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_referrals_external_post")
                            .from(Referrals::Table, Referrals::ExternalPostId)
                            .to(ExternalMedicalPosts::Table, ExternalMedicalPosts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_referrals_destination")
                            .from(Referrals::Table, Referrals::DestinationDepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ConsultationDerivations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConsultationDerivations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ConsultationDerivations::DerivationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ConsultationDerivations::DoctorId).uuid().not_null())
                    .col(
                        ColumnDef::new(ConsultationDerivations::DepartmentHeadId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConsultationDerivations::Diagnosis)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConsultationDerivations::ConsultationDate)
                            .date()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consultation_derivations_derivation")
                            .from(
                                ConsultationDerivations::Table,
                                ConsultationDerivations::DerivationId,
                            )
                            .to(Derivations::Table, Derivations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consultation_derivations_doctor")
                            .from(ConsultationDerivations::Table, ConsultationDerivations::DoctorId)
                            .to(Doctors::Table, Doctors::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consultation_derivations_head")
                            .from(
                                ConsultationDerivations::Table,
                                ConsultationDerivations::DepartmentHeadId,
                            )
                            .to(DepartmentHeads::Table, DepartmentHeads::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ConsultationReferrals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConsultationReferrals::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ConsultationReferrals::ReferralId).uuid().not_null())
                    .col(ColumnDef::new(ConsultationReferrals::DoctorId).uuid().not_null())
                    .col(
                        ColumnDef::new(ConsultationReferrals::DepartmentHeadId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ConsultationReferrals::Diagnosis).text().not_null())
                    .col(
                        ColumnDef::new(ConsultationReferrals::ConsultationDate)
                            .date()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consultation_referrals_referral")
                            .from(ConsultationReferrals::Table, ConsultationReferrals::ReferralId)
                            .to(Referrals::Table, Referrals::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consultation_referrals_doctor")
                            .from(ConsultationReferrals::Table, ConsultationReferrals::DoctorId)
                            .to(Doctors::Table, Doctors::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consultation_referrals_head")
                            .from(
                                ConsultationReferrals::Table,
                                ConsultationReferrals::DepartmentHeadId,
                            )
                            .to(DepartmentHeads::Table, DepartmentHeads::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConsultationReferrals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ConsultationDerivations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Referrals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Derivations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Patients {
    Table,
    Id,
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
}

#[derive(Iden)]
enum ExternalMedicalPosts {
    Table,
    Id,
}

#[derive(Iden)]
enum Doctors {
    Table,
    Id,
}

#[derive(Iden)]
enum DepartmentHeads {
    Table,
    Id,
}

#[derive(Iden)]
enum Derivations {
    Table,
    Id,
    PatientId,
    OriginDepartmentId,
    DestinationDepartmentId,
    DerivationDate,
    Reason,
}

#[derive(Iden)]
enum Referrals {
    Table,
    Id,
    PatientId,
    ExternalPostId,
    DestinationDepartmentId,
    ReferralDate,
    Reason,
}

#[derive(Iden)]
enum ConsultationDerivations {
    Table,
    Id,
    DerivationId,
    DoctorId,
    DepartmentHeadId,
    Diagnosis,
    ConsultationDate,
}

#[derive(Iden)]
enum ConsultationReferrals {
    Table,
    Id,
    ReferralId,
    DoctorId,
    DepartmentHeadId,
    Diagnosis,
    ConsultationDate,
}
