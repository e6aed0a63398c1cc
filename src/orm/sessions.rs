//! SeaORM Entity for sessions table
//!
//! A session is a talk proposed to a conference. It carries an author and
//! optionally a second author, both of whom are barred from voting on it.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub conference_id: i32,
    pub author_id: i32,
    pub second_author_id: Option<i32>,
    pub title: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::conferences::Entity",
        from = "Column::ConferenceId",
        to = "super::conferences::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Conference,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SecondAuthorId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    SecondAuthor,
    #[sea_orm(has_many = "super::votes::Entity")]
    Votes,
}

impl Related<super::conferences::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Conference.def()
    }
}

impl Related<super::votes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
