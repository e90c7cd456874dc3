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
                    .col(string(Users::Username).unique_key())
                    .col(string(Users::DisplayName))
                    .col(string_len(Users::Role, 20))
                    .col(string_null(Users::Phone).unique_key())
                    .col(string_null(Users::Email).unique_key())
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(pk_auto(Students::Id))
                    .col(string(Students::StudentCode).unique_key())
                    .col(integer(Students::UserId).unique_key())
                    .col(string_null(Students::Sex))
                    .col(date_null(Students::DateOfBirth))
                    .col(string_null(Students::AcademicYear))
                    .col(string_null(Students::Faculty))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_user")
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create organizers table
        manager
            .create_table(
                Table::create()
                    .table(Organizers::Table)
                    .if_not_exists()
                    .col(pk_auto(Organizers::Id))
                    .col(integer(Organizers::UserId).unique_key())
                    .col(string(Organizers::Department))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organizer_user")
                            .from(Organizers::Table, Organizers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create semesters table
        manager
            .create_table(
                Table::create()
                    .table(Semesters::Table)
                    .if_not_exists()
                    .col(pk_auto(Semesters::Id))
                    .col(string(Semesters::Name).unique_key())
                    .col(date(Semesters::StartDate))
                    .col(date(Semesters::EndDate))
                    .to_owned(),
            )
            .await?;

        // Create activities table
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(pk_auto(Activities::Id))
                    .col(integer(Activities::SemesterId))
                    .col(integer(Activities::OrganizerId))
                    .col(string(Activities::Name))
                    .col(string_null(Activities::Description))
                    .col(string_len(Activities::ActivityType, 20))
                    .col(string_len(Activities::Status, 20))
                    .col(date_time(Activities::RegistrationStart))
                    .col(date_time(Activities::RegistrationEnd))
                    .col(date_time(Activities::EventStart))
                    .col(date_time(Activities::EventEnd))
                    .col(string(Activities::Location))
                    .col(integer(Activities::Capacity))
                    .col(integer(Activities::TrainingPoint))
                    .col(string_null(Activities::ImageUrl))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_semester")
                            .from(Activities::Table, Activities::SemesterId)
                            .to(Semesters::Table, Semesters::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_organizer")
                            .from(Activities::Table, Activities::OrganizerId)
                            .to(Organizers::Table, Organizers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create participations table
        manager
            .create_table(
                Table::create()
                    .table(Participations::Table)
                    .if_not_exists()
                    .col(pk_auto(Participations::Id))
                    .col(integer(Participations::StudentId))
                    .col(integer(Participations::ActivityId))
                    .col(string_len(Participations::Status, 20))
                    .col(integer(Participations::TrainingPoint))
                    .col(string_len(Participations::ActivityType, 20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participation_student")
                            .from(Participations::Table, Participations::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participation_activity")
                            .from(Participations::Table, Participations::ActivityId)
                            .to(Activities::Table, Activities::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One participation per (student, activity) pair
        manager
            .create_index(
                Index::create()
                    .name("uq_participations_student_activity")
                    .table(Participations::Table)
                    .col(Participations::StudentId)
                    .col(Participations::ActivityId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Participations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Semesters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organizers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
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
    DisplayName,
    Role,
    Phone,
    Email,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    StudentCode,
    UserId,
    Sex,
    DateOfBirth,
    AcademicYear,
    Faculty,
}

#[derive(DeriveIden)]
enum Organizers {
    Table,
    Id,
    UserId,
    Department,
}

#[derive(DeriveIden)]
enum Semesters {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
}

#[derive(DeriveIden)]
enum Activities {
    Table,
    Id,
    SemesterId,
    OrganizerId,
    Name,
    Description,
    ActivityType,
    Status,
    RegistrationStart,
    RegistrationEnd,
    EventStart,
    EventEnd,
    Location,
    Capacity,
    TrainingPoint,
    ImageUrl,
}

#[derive(DeriveIden)]
enum Participations {
    Table,
    Id,
    StudentId,
    ActivityId,
    Status,
    TrainingPoint,
    ActivityType,
}
