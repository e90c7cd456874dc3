use crate::entity_iden::EntityIden;
use model::entities::prelude::*;
use model::entities::{complaint, notification, participation, user};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create complaints table
        manager
            .create_table(
                Table::create()
                    .table(Complaint::table())
                    .if_not_exists()
                    .col(pk_auto(Complaint::column(complaint::Column::Id)))
                    .col(integer(Complaint::column(complaint::Column::ParticipationId)))
                    .col(string(Complaint::column(complaint::Column::Description)))
                    .col(string_len(Complaint::column(complaint::Column::Status), 20))
                    .col(string_null(Complaint::column(complaint::Column::Response)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_participation")
                            .from(
                                Complaint::table(),
                                Complaint::column(complaint::Column::ParticipationId),
                            )
                            .to(
                                Participation::table(),
                                Participation::column(participation::Column::Id),
                            )
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create notifications table
        manager
            .create_table(
                Table::create()
                    .table(Notification::table())
                    .if_not_exists()
                    .col(pk_auto(Notification::column(notification::Column::Id)))
                    .col(integer(Notification::column(notification::Column::SenderId)))
                    .col(integer(Notification::column(notification::Column::RecipientId)))
                    .col(string(Notification::column(notification::Column::Title)))
                    .col(string(Notification::column(notification::Column::Message)))
                    .col(string_len(Notification::column(notification::Column::Status), 20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_sender")
                            .from(
                                Notification::table(),
                                Notification::column(notification::Column::SenderId),
                            )
                            .to(User::table(), User::column(user::Column::Id))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_recipient")
                            .from(
                                Notification::table(),
                                Notification::column(notification::Column::RecipientId),
                            )
                            .to(User::table(), User::column(user::Column::Id))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notification::table()).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Complaint::table()).to_owned())
            .await?;

        Ok(())
    }
}
