use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

/// Machine-readable API description, served where the Swagger UI used to
/// fetch it from.
#[get("/api-docs")]
pub async fn api_docs() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "openapi": "3.0.0",
        "info": {
            "title": "tube-api",
            "description": "REST API backend for a video-sharing platform clone",
            "version": "0.1.0"
        },
        "paths": {
            "/": {
                "get": {
                    "summary": "List all videos with channel and view count",
                    "responses": {
                        "200": { "description": "Array of video summaries" },
                        "500": { "description": "Database error" }
                    }
                }
            },
            "/result": {
                "get": {
                    "summary": "Search videos by title or channel name",
                    "parameters": [{
                        "name": "search_query",
                        "in": "query",
                        "required": false,
                        "schema": { "type": "string" },
                        "description": "Substring match against video title and channel name; omitting it returns everything"
                    }],
                    "responses": {
                        "200": { "description": "Array of matching video summaries" },
                        "500": { "description": "Database error" }
                    }
                }
            },
            "/watch": {
                "get": {
                    "summary": "Fetch a single video with channel info, engagement counts and comments",
                    "parameters": [
                        {
                            "name": "v",
                            "in": "query",
                            "required": true,
                            "schema": { "type": "integer" },
                            "description": "Video id"
                        },
                        {
                            "name": "user_id",
                            "in": "query",
                            "required": false,
                            "schema": { "type": "integer" },
                            "description": "Viewer id used to compute the subscription flag"
                        }
                    ],
                    "responses": {
                        "200": { "description": "Single-element array with the video and its comments" },
                        "400": { "description": "Missing video parameter" },
                        "404": { "description": "No such video" },
                        "500": { "description": "Database error" }
                    }
                }
            },
            "/user": {
                "get": {
                    "summary": "List channels with subscriber counts and the user's subscription flag",
                    "parameters": [{
                        "name": "user_id",
                        "in": "query",
                        "required": true,
                        "schema": { "type": "integer" }
                    }],
                    "responses": {
                        "200": { "description": "Array of channels" },
                        "400": { "description": "Missing user parameter" },
                        "500": { "description": "Database error" }
                    }
                },
                "post": {
                    "summary": "Create a user",
                    "requestBody": {
                        "content": {
                            "application/x-www-form-urlencoded": {
                                "schema": {
                                    "type": "object",
                                    "required": ["username"],
                                    "properties": {
                                        "username": { "type": "string" },
                                        "password": { "type": "string" },
                                        "email": { "type": "string" },
                                        "first_name": { "type": "string" },
                                        "last_name": { "type": "string" },
                                        "profile_picture_url": { "type": "string" }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": { "description": "User created" },
                        "400": { "description": "Missing username or invalid email" },
                        "500": { "description": "Database error" }
                    }
                }
            }
        }
    }))
}
