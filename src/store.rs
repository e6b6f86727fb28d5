use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    sea_query::Expr,
};

use crate::{
    entities::movie::{self, StringList},
    models::{MoviePatch, NewMovie},
};

pub type StoreResult<T> = Result<T, DbErr>;

/// Query primitives over the `movies` collection.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, new: NewMovie) -> StoreResult<movie::Model> {
        let model = movie::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            title: Set(new.title),
            release_year: Set(new.release_year),
            genre: Set(StringList(new.genre)),
            director: Set(new.director),
            actors: Set(StringList(new.actors)),
            language: Set(new.language),
            country: Set(new.country),
            rating: Set(new.rating),
            plot: Set(new.plot),
            awards: Set(new.awards),
            poster_url: Set(new.poster_url),
            trailer_url: Set(new.trailer_url),
        };

        model.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<movie::Model>> {
        movie::Entity::find_by_id(id.to_string()).one(&self.db).await
    }

    /// First movie with exactly this title.
    pub async fn find_by_title(&self, title: &str) -> StoreResult<Option<movie::Model>> {
        movie::Entity::find().filter(movie::Column::Title.eq(title)).one(&self.db).await
    }

    pub async fn find_all(&self) -> StoreResult<Vec<movie::Model>> {
        movie::Entity::find().all(&self.db).await
    }

    pub async fn find_by_director(&self, director: &str) -> StoreResult<Vec<movie::Model>> {
        movie::Entity::find()
            .filter(movie::Column::Director.eq(director))
            .all(&self.db)
            .await
    }

    /// Movies whose genre list contains `genre`.
    pub async fn find_by_genre(&self, genre: &str) -> StoreResult<Vec<movie::Model>> {
        movie::Entity::find()
            .filter(Expr::cust_with_values(
                "EXISTS (SELECT 1 FROM json_each(movies.genre) WHERE json_each.value = ?)",
                [genre],
            ))
            .all(&self.db)
            .await
    }

    /// Writes the supplied fields in one statement, then re-reads the row.
    /// Concurrent writers to the same movie race; the last one wins.
    pub async fn update_by_id(
        &self,
        id: &str,
        patch: MoviePatch,
    ) -> StoreResult<Option<movie::Model>> {
        let changes = patch_columns(patch);

        if changes.is_changed() {
            let res = movie::Entity::update_many()
                .set(changes)
                .filter(movie::Column::Id.eq(id))
                .exec(&self.db)
                .await?;
            if res.rows_affected == 0 {
                return Ok(None);
            }
        }

        self.find_by_id(id).await
    }

    /// Applies `patch` to the first movie with exactly this title.
    pub async fn update_by_title(
        &self,
        title: &str,
        patch: MoviePatch,
    ) -> StoreResult<Option<movie::Model>> {
        let Some(target) = self.find_by_title(title).await? else {
            return Ok(None);
        };
        self.update_by_id(&target.id, patch).await
    }

    /// Returns the removed movie, or `None` if the id was unknown or another
    /// request removed it first.
    pub async fn delete_by_id(&self, id: &str) -> StoreResult<Option<movie::Model>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let res = movie::Entity::delete_by_id(id.to_string()).exec(&self.db).await?;
        Ok((res.rows_affected > 0).then_some(existing))
    }

    /// Removes the first movie with exactly this title.
    pub async fn delete_by_title(&self, title: &str) -> StoreResult<Option<movie::Model>> {
        let Some(target) = self.find_by_title(title).await? else {
            return Ok(None);
        };
        self.delete_by_id(&target.id).await
    }
}

/// Column assignments for the fields present in `patch`; the rest stay `NotSet`.
fn patch_columns(patch: MoviePatch) -> movie::ActiveModel {
    let mut active = <movie::ActiveModel as ActiveModelTrait>::default();

    if let Some(title) = patch.title {
        active.title = Set(title);
    }
    if let Some(year) = patch.release_year {
        active.release_year = Set(Some(year));
    }
    if let Some(genre) = patch.genre {
        active.genre = Set(StringList(genre));
    }
    if let Some(director) = patch.director {
        active.director = Set(Some(director));
    }
    if let Some(actors) = patch.actors {
        active.actors = Set(StringList(actors));
    }
    if let Some(language) = patch.language {
        active.language = Set(Some(language));
    }
    if let Some(country) = patch.country {
        active.country = Set(Some(country));
    }
    if let Some(rating) = patch.rating {
        active.rating = Set(Some(rating));
    }
    if let Some(plot) = patch.plot {
        active.plot = Set(Some(plot));
    }
    if let Some(awards) = patch.awards {
        active.awards = Set(Some(awards));
    }
    if let Some(url) = patch.poster_url {
        active.poster_url = Set(Some(url));
    }
    if let Some(url) = patch.trailer_url {
        active.trailer_url = Set(Some(url));
    }

    active
}
