use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(string(Movies::Id).primary_key())
                    .col(string(Movies::Title))
                    .col(integer_null(Movies::ReleaseYear))
                    .col(json(Movies::Genre))
                    .col(string_null(Movies::Director))
                    .col(json(Movies::Actors))
                    .col(string_null(Movies::Language))
                    .col(string_null(Movies::Country))
                    .col(double_null(Movies::Rating))
                    .col(text_null(Movies::Plot))
                    .col(string_null(Movies::Awards))
                    .col(string_null(Movies::PosterUrl))
                    .col(string_null(Movies::TrailerUrl))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_title")
                    .table(Movies::Table)
                    .col(Movies::Title)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_director")
                    .table(Movies::Table)
                    .col(Movies::Director)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    ReleaseYear,
    Genre,
    Director,
    Actors,
    Language,
    Country,
    Rating,
    Plot,
    Awards,
    PosterUrl,
    TrailerUrl,
}
