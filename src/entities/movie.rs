use sea_orm::{FromJsonQueryResult, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Ordered list of strings persisted as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub release_year: Option<i32>,
    #[sea_orm(column_type = "Json")]
    pub genre: StringList,
    pub director: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub actors: StringList,
    pub language: Option<String>,
    pub country: Option<String>,
    pub rating: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub plot: Option<String>,
    pub awards: Option<String>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
