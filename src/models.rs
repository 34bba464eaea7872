use chrono::NaiveDateTime;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::schema::channels::columns::{name, profile_picture_url};
use crate::schema::popular::columns::view_count;
use crate::schema::users;
use crate::schema::videos::columns::{created_at, thumbnail_url, title, video_id};

#[derive(Queryable, Serialize)]
pub struct VideoSummary {
    pub video_id: i32,
    pub title: String,
    pub created_at: NaiveDateTime,
    pub thumbnail_url: String,
    pub channel_name: String,
    pub profile_picture_url: String,
    pub view_count: i32,
}

pub type VideoSummaryFields = (video_id, title, created_at, thumbnail_url, name, profile_picture_url, view_count);

// TODO: is there a nicer way to do this?
pub fn video_summary_fields() -> VideoSummaryFields {
    (
        crate::schema::videos::video_id,
        crate::schema::videos::title,
        crate::schema::videos::created_at,
        crate::schema::videos::thumbnail_url,
        crate::schema::channels::name,
        crate::schema::channels::profile_picture_url,
        crate::schema::popular::view_count,
    )
}

#[derive(Queryable)]
pub struct WatchRow {
    pub video_id: i32,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub video_type: String,
    pub resolution: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub created_at: NaiveDateTime,
    pub channel_name: String,
    pub profile_picture_url: String,
    pub view_count: i32,
    pub like_count: i32,
    pub is_subscribed: bool,
}

#[derive(Serialize)]
pub struct WatchVideo {
    pub video_id: i32,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub video_type: String,
    pub resolution: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub created_at: NaiveDateTime,
    pub channel_name: String,
    pub profile_picture_url: String,
    pub view_count: i32,
    pub like_count: i32,
    pub is_subscribed: bool,
    pub comments: Vec<CommentEntry>,
}

impl WatchVideo {
    pub fn from_row(row: WatchRow, comments: Vec<CommentEntry>) -> WatchVideo {
        WatchVideo {
            video_id: row.video_id,
            title: row.title,
            description: row.description,
            duration: row.duration,
            video_type: row.video_type,
            resolution: row.resolution,
            thumbnail_url: row.thumbnail_url,
            video_url: row.video_url,
            created_at: row.created_at,
            channel_name: row.channel_name,
            profile_picture_url: row.profile_picture_url,
            view_count: row.view_count,
            like_count: row.like_count,
            is_subscribed: row.is_subscribed,
            comments,
        }
    }
}

#[derive(Queryable)]
pub struct CommentEntry {
    pub username: String,
    pub content: String,
}

// The frontend expects each comment as a single-key object keyed by the
// commenting username: {"<username>": {"content": "<text>"}}
impl Serialize for CommentEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            content: &'a str,
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.username, &Body { content: &self.content })?;
        map.end()
    }
}

#[derive(Queryable, Serialize)]
pub struct ChannelOverview {
    pub channel_id: i32,
    pub name: String,
    pub profile_picture_url: String,
    pub subscriber_count: i64,
    pub is_subscribed: bool,
}

#[derive(Insertable)]
#[table_name = "users"]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub profile_picture_url: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn comment_entry_is_keyed_by_username() {
        let entry = CommentEntry {
            username: "alice".to_string(),
            content: "nice video".to_string(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"alice":{"content":"nice video"}}"#);
    }

    #[test]
    fn comment_entry_survives_delimiter_characters() {
        // Usernames and content containing ": " or newlines used to corrupt
        // the old GROUP_CONCAT parsing. They must round-trip untouched now.
        let entry = CommentEntry {
            username: "bob: the builder".to_string(),
            content: "line one\nline two: part".to_string(),
        };

        let value: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value["bob: the builder"]["content"],
            "line one\nline two: part"
        );
    }

    #[test]
    fn watch_video_with_no_comments_serializes_empty_array() {
        let row = WatchRow {
            video_id: 7,
            title: "t".to_string(),
            description: "d".to_string(),
            duration: 120,
            video_type: "mp4".to_string(),
            resolution: "1080p".to_string(),
            thumbnail_url: "thumb".to_string(),
            video_url: "url".to_string(),
            created_at: NaiveDate::from_ymd(2023, 1, 1).and_hms(0, 0, 0),
            channel_name: "chan".to_string(),
            profile_picture_url: "pic".to_string(),
            view_count: 10,
            like_count: 2,
            is_subscribed: false,
        };

        let video = WatchVideo::from_row(row, Vec::new());
        let value: serde_json::Value = serde_json::to_value(&video).unwrap();
        assert_eq!(value["comments"], serde_json::json!([]));
        assert_eq!(value["video_id"], 7);
    }
}
