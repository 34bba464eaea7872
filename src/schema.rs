table! {
    channel_subscriptions (channel_id, user_id) {
        channel_id -> Integer,
        user_id -> Integer,
    }
}

table! {
    channels (channel_id) {
        channel_id -> Integer,
        name -> Varchar,
        profile_picture_url -> Varchar,
    }
}

table! {
    comments (comment_id) {
        comment_id -> Integer,
        video_id -> Integer,
        user_id -> Integer,
        content -> Text,
        created_at -> Timestamp,
    }
}

table! {
    popular (video_id) {
        video_id -> Integer,
        view_count -> Integer,
        like_count -> Integer,
    }
}

table! {
    users (user_id) {
        user_id -> Integer,
        username -> Varchar,
        password -> Varchar,
        email -> Nullable<Varchar>,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
        profile_picture_url -> Nullable<Varchar>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    videos (video_id) {
        video_id -> Integer,
        channel_id -> Integer,
        title -> Varchar,
        description -> Text,
        duration -> Integer,
        video_type -> Varchar,
        resolution -> Varchar,
        thumbnail_url -> Varchar,
        video_url -> Varchar,
        created_at -> Timestamp,
    }
}

joinable!(videos -> channels (channel_id));
joinable!(popular -> videos (video_id));
joinable!(comments -> videos (video_id));
joinable!(comments -> users (user_id));
joinable!(channel_subscriptions -> channels (channel_id));
joinable!(channel_subscriptions -> users (user_id));

allow_tables_to_appear_in_same_query!(
    channel_subscriptions,
    channels,
    comments,
    popular,
    users,
    videos,
);
