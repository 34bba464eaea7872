use actix_web::{get, web, HttpResponse, Responder};
use diesel::dsl::exists;
use diesel::mysql::Mysql;
use diesel::{
    BoolExpressionMethods, ExpressionMethods, QueryDsl, QueryResult, RunQueryDsl,
    TextExpressionMethods,
};
use serde::Deserialize;

use crate::models::{
    video_summary_fields, CommentEntry, VideoSummary, VideoSummaryFields, WatchRow, WatchVideo,
};
use crate::schema::channel_subscriptions::dsl::channel_subscriptions;
use crate::schema::channels::dsl::channels;
use crate::schema::comments::dsl::comments;
use crate::schema::popular::dsl::popular;
use crate::schema::users::dsl::users;
use crate::schema::videos::dsl::videos;
use crate::DbPool;

#[get("/")]
pub async fn list_videos(pool: web::Data<DbPool>) -> impl Responder {
    let conn = match pool.get() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Couldn't get a database connection: {}", e);
            return HttpResponse::InternalServerError().body("Failed to fetch videos");
        }
    };

    let result: QueryResult<Vec<VideoSummary>> = videos
        .inner_join(channels)
        .inner_join(popular)
        .select(video_summary_fields())
        .load(&conn);

    match result {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("Failed to load videos: {}", e);
            HttpResponse::InternalServerError().body("Failed to fetch videos")
        }
    }
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub search_query: Option<String>,
}

type VideoSearchQuery = diesel::dsl::IntoBoxed<
    'static,
    diesel::dsl::Select<
        diesel::dsl::InnerJoin<
            diesel::dsl::InnerJoin<crate::schema::videos::table, crate::schema::channels::table>,
            crate::schema::popular::table,
        >,
        VideoSummaryFields,
    >,
    Mysql,
>;

// A missing search_query means no filter at all, not a search for the
// literal parameter name.
fn video_search_query(search_query: Option<&str>) -> VideoSearchQuery {
    let mut query = videos
        .inner_join(channels)
        .inner_join(popular)
        .select(video_summary_fields())
        .into_boxed();

    if let Some(q) = search_query {
        let pattern = format!("%{}%", q);
        query = query.filter(
            crate::schema::videos::title
                .like(pattern.clone())
                .or(crate::schema::channels::name.like(pattern)),
        );
    }

    query
}

#[get("/result")]
pub async fn search_videos(
    params: web::Query<SearchParams>,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let conn = match pool.get() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Couldn't get a database connection: {}", e);
            return HttpResponse::InternalServerError().body("Failed to search videos");
        }
    };

    let result: QueryResult<Vec<VideoSummary>> =
        video_search_query(params.search_query.as_deref()).load(&conn);

    match result {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("Failed to search videos: {}", e);
            HttpResponse::InternalServerError().body("Failed to search videos")
        }
    }
}

#[derive(Deserialize)]
pub struct WatchParams {
    pub v: Option<i32>,
    // There is no session layer; the viewer identifies themselves through
    // the query string. Without it the subscription flag is false.
    pub user_id: Option<i32>,
}

#[get("/watch")]
pub async fn watch_video(params: web::Query<WatchParams>, pool: web::Data<DbPool>) -> impl Responder {
    let vid = match params.v {
        Some(v) => v,
        None => {
            return HttpResponse::BadRequest().body("Invalid video parameter");
        }
    };
    let conn = match pool.get() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Couldn't get a database connection: {}", e);
            return HttpResponse::InternalServerError().body("Failed to fetch video");
        }
    };

    let row: QueryResult<WatchRow> = videos
        .inner_join(channels)
        .inner_join(popular)
        .filter(crate::schema::videos::video_id.eq(vid))
        .select((
            crate::schema::videos::video_id,
            crate::schema::videos::title,
            crate::schema::videos::description,
            crate::schema::videos::duration,
            crate::schema::videos::video_type,
            crate::schema::videos::resolution,
            crate::schema::videos::thumbnail_url,
            crate::schema::videos::video_url,
            crate::schema::videos::created_at,
            crate::schema::channels::name,
            crate::schema::channels::profile_picture_url,
            crate::schema::popular::view_count,
            crate::schema::popular::like_count,
            // An absent viewer becomes an empty IN list, which diesel
            // renders as an impossible predicate. No sentinel user id.
            exists(
                channel_subscriptions.filter(
                    crate::schema::channel_subscriptions::channel_id
                        .eq(crate::schema::videos::channel_id)
                        .and(crate::schema::channel_subscriptions::user_id.eq_any(params.user_id)),
                ),
            ),
        ))
        .first(&conn);

    let row = match row {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return HttpResponse::NotFound().body("Video not found");
        }
        Err(e) => {
            log::error!("Failed to load video {}: {}", vid, e);
            return HttpResponse::InternalServerError().body("Failed to fetch video");
        }
    };

    // Comments come back as plain rows and get grouped here instead of
    // being concatenated into one delimited string inside SQL.
    let comment_rows: QueryResult<Vec<CommentEntry>> = comments
        .inner_join(users)
        .filter(crate::schema::comments::video_id.eq(vid))
        .order(crate::schema::comments::created_at.asc())
        .select((
            crate::schema::users::username,
            crate::schema::comments::content,
        ))
        .load(&conn);

    let comment_rows = match comment_rows {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("Failed to load comments for video {}: {}", vid, e);
            return HttpResponse::InternalServerError().body("Failed to fetch video");
        }
    };

    HttpResponse::Ok().json(vec![WatchVideo::from_row(row, comment_rows)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_pool;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    #[actix_rt::test]
    async fn watch_without_video_parameter_is_rejected() {
        let mut app =
            test::init_service(App::new().data(test_pool()).service(watch_video)).await;

        let req = test::TestRequest::get().uri("/watch").to_request();
        let resp = test::call_service(&mut app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn search_without_query_is_unfiltered() {
        let sql = diesel::debug_query::<Mysql, _>(&video_search_query(None)).to_string();

        assert!(!sql.contains("LIKE"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn search_with_query_filters_title_and_channel_name() {
        let sql = diesel::debug_query::<Mysql, _>(&video_search_query(Some("abc"))).to_string();

        assert!(sql.contains("`title` LIKE ?"));
        assert!(sql.contains("OR"));
        assert!(sql.contains("`name` LIKE ?"));
        assert!(sql.contains("%abc%"));
    }

    #[test]
    fn search_query_text_is_bound_not_spliced() {
        // A quote in the search text must land in the binds, never in the SQL.
        let sql =
            diesel::debug_query::<Mysql, _>(&video_search_query(Some("ab'c"))).to_string();

        let (statement, binds) = sql.split_at(sql.find("-- binds").unwrap());
        assert!(!statement.contains("ab'c"));
        assert!(binds.contains("%ab'c%"));
    }

    #[test]
    fn anonymous_viewer_subscription_predicate_is_impossible() {
        let subscribed = channel_subscriptions
            .filter(crate::schema::channel_subscriptions::user_id.eq_any(None::<i32>))
            .select(crate::schema::channel_subscriptions::user_id);
        let sql = diesel::debug_query::<Mysql, _>(&subscribed).to_string();

        assert!(sql.contains("1=0"));

        let subscribed = channel_subscriptions
            .filter(crate::schema::channel_subscriptions::user_id.eq_any(Some(42)))
            .select(crate::schema::channel_subscriptions::user_id);
        let sql = diesel::debug_query::<Mysql, _>(&subscribed).to_string();

        assert!(sql.contains("IN"));
        assert!(sql.contains("42"));
    }

    #[actix_rt::test]
    async fn watch_ignores_unknown_parameters() {
        let mut app =
            test::init_service(App::new().data(test_pool()).service(watch_video)).await;

        // Still a 400: extra parameters don't stand in for the video id.
        let req = test::TestRequest::get().uri("/watch?video=3").to_request();
        let resp = test::call_service(&mut app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
