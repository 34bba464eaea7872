use actix_web::{get, post, web, HttpResponse, Responder};
use bcrypt::hash;
use chrono::Utc;
use diesel::dsl::{exists, sql};
use diesel::sql_types::BigInt;
use diesel::{BoolExpressionMethods, ExpressionMethods, QueryDsl, QueryResult, RunQueryDsl};
use serde::Deserialize;
use validator::Validate;

use crate::models::{ChannelOverview, NewUser};
use crate::schema::channel_subscriptions::dsl::channel_subscriptions;
use crate::schema::channels::dsl::channels;
use crate::schema::users::dsl::users;
use crate::DbPool;

#[derive(Deserialize)]
pub struct GetUserParams {
    pub user_id: Option<i32>,
}

/// Lists every channel together with its subscriber count and whether the
/// given user is subscribed to it.
#[get("/user")]
pub async fn get_user(params: web::Query<GetUserParams>, pool: web::Data<DbPool>) -> impl Responder {
    let uid = match params.user_id {
        Some(v) => v,
        None => {
            return HttpResponse::BadRequest().body("Invalid user parameter");
        }
    };

    let conn = match pool.get() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Couldn't get a database connection: {}", e);
            return HttpResponse::InternalServerError().body("Failed to fetch user");
        }
    };

    let result: QueryResult<Vec<ChannelOverview>> = channels
        .select((
            crate::schema::channels::channel_id,
            crate::schema::channels::name,
            crate::schema::channels::profile_picture_url,
            sql::<BigInt>(
                "(SELECT COUNT(*) FROM channel_subscriptions s \
                 WHERE s.channel_id = channels.channel_id)",
            ),
            exists(
                channel_subscriptions.filter(
                    crate::schema::channel_subscriptions::channel_id
                        .eq(crate::schema::channels::channel_id)
                        .and(crate::schema::channel_subscriptions::user_id.eq(uid)),
                ),
            ),
        ))
        .load(&conn);

    match result {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("Failed to load subscriptions for user {}: {}", uid, e);
            HttpResponse::InternalServerError().body("Failed to fetch user")
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct CreateUserForm {
    pub username: Option<String>,
    pub password: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture_url: Option<String>,
}

#[post("/user")]
pub async fn create_user(
    form: web::Form<CreateUserForm>,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let username = match form.username.as_deref() {
        Some(u) if !u.is_empty() => u,
        _ => {
            return HttpResponse::BadRequest().body("Username is required");
        }
    };

    if form.validate().is_err() {
        return HttpResponse::BadRequest().body("Invalid email supplied");
    }

    // Passwords are stored as bcrypt hashes, never as the submitted text.
    let hashed_password = match hash(form.password.as_deref().unwrap_or(""), 4) {
        Ok(v) => v,
        Err(e) => {
            log::error!("Failed to hash password: {}", e);
            return HttpResponse::InternalServerError().body("Failed to create user");
        }
    };

    let conn = match pool.get() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Couldn't get a database connection: {}", e);
            return HttpResponse::InternalServerError().body("Failed to create user");
        }
    };

    let now = Utc::now().naive_utc();
    let new_user = NewUser {
        username,
        password: &hashed_password,
        email: form.email.as_deref(),
        first_name: form.first_name.as_deref(),
        last_name: form.last_name.as_deref(),
        profile_picture_url: form.profile_picture_url.as_deref(),
        created_at: now,
        updated_at: now,
    };

    let result = diesel::insert_into(users).values(&new_user).execute(&conn);

    match result {
        Ok(_) => HttpResponse::Ok().body("User created"),
        Err(e) => {
            log::error!("Failed to insert user {}: {}", username, e);
            HttpResponse::InternalServerError().body("Failed to create user")
        }
    }
}
