//! API 信息、健康检查与 OpenAPI 文档

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use super::AppState;
use crate::core::CoreError;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// API 信息
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "name": "goods-catalog",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "商品目录 REST API",
        "endpoints": {
            "GET /goods": "获取所有商品",
            "POST /goods": "创建商品 (JSON、表单或 multipart，可附带 image 文件)",
            "GET /goods/:id": "获取特定商品",
            "PATCH /goods/:id": "部分更新商品",
            "DELETE /goods/:id": "删除商品",
            "GET /users": "获取所有用户",
            "POST /users": "创建用户",
            "GET /users/:id": "获取特定用户",
            "PATCH /users/:id": "部分更新用户",
            "DELETE /users/:id": "删除用户",
            "GET /health": "健康检查",
        },
        "docs": OPENAPI_PATH,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// 健康检查
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, CoreError> {
    Ok(Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "storage": {
            "type": "in-memory",
            "goods_count": state.goods.count()?,
            "users_count": state.users.count()?,
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
    })
}

fn id_parameter() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    })
}

fn good_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "category": { "type": "string" },
            "description": { "type": "string" },
            "price": { "type": "number", "minimum": 0 },
            "stock": { "type": "integer", "minimum": 0 }
        }
    })
}

fn good_multipart_schema() -> Value {
    let mut schema = good_input_schema();
    schema["properties"]["image"] = json!({ "type": "string", "format": "binary" });
    schema
}

/// 构造 OpenAPI 3 文档
pub fn openapi_document(upload_prefix: &str) -> Value {
    let good_ref = json!({ "$ref": "#/components/schemas/Good" });
    let user_ref = json!({ "$ref": "#/components/schemas/User" });
    let ok_good = json!({ "description": "OK", "content": { "application/json": { "schema": good_ref } } });
    let ok_user = json!({ "description": "OK", "content": { "application/json": { "schema": user_ref } } });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Goods Catalog API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": format!("内存商品目录。上传的图片位于 {}/", upload_prefix.trim_end_matches('/'))
        },
        "paths": {
            "/goods": {
                "get": {
                    "summary": "获取所有商品",
                    "responses": {
                        "200": { "description": "OK", "content": { "application/json": { "schema": { "type": "array", "items": good_ref } } } }
                    }
                },
                "post": {
                    "summary": "创建商品",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": { "schema": good_input_schema() },
                            "multipart/form-data": { "schema": good_multipart_schema() }
                        }
                    },
                    "responses": {
                        "201": ok_good,
                        "400": error_response("缺少必填字段或字段无效"),
                        "415": error_response("不支持的图片类型")
                    }
                }
            },
            "/goods/{id}": {
                "parameters": [id_parameter()],
                "get": {
                    "summary": "获取特定商品",
                    "responses": { "200": ok_good, "404": error_response("商品不存在") }
                },
                "patch": {
                    "summary": "部分更新商品",
                    "requestBody": {
                        "content": {
                            "application/json": { "schema": good_input_schema() },
                            "multipart/form-data": { "schema": good_multipart_schema() }
                        }
                    },
                    "responses": {
                        "200": ok_good,
                        "400": error_response("字段无效"),
                        "404": error_response("商品不存在"),
                        "415": error_response("不支持的图片类型")
                    }
                },
                "delete": {
                    "summary": "删除商品",
                    "responses": { "204": { "description": "已删除" }, "404": error_response("商品不存在") }
                }
            },
            "/users": {
                "get": {
                    "summary": "获取所有用户",
                    "responses": {
                        "200": { "description": "OK", "content": { "application/json": { "schema": { "type": "array", "items": user_ref } } } }
                    }
                },
                "post": {
                    "summary": "创建用户",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/UserInput" } } }
                    },
                    "responses": { "201": ok_user, "400": error_response("字段无效") }
                }
            },
            "/users/{id}": {
                "parameters": [id_parameter()],
                "get": {
                    "summary": "获取特定用户",
                    "responses": { "200": ok_user, "404": error_response("用户不存在") }
                },
                "patch": {
                    "summary": "部分更新用户",
                    "requestBody": {
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/UserInput" } } }
                    },
                    "responses": { "200": ok_user, "400": error_response("字段无效"), "404": error_response("用户不存在") }
                },
                "delete": {
                    "summary": "删除用户",
                    "responses": { "204": { "description": "已删除" }, "404": error_response("用户不存在") }
                }
            }
        },
        "components": {
            "schemas": {
                "Good": {
                    "type": "object",
                    "required": ["id", "name", "category", "description", "price", "stock", "image"],
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "name": { "type": "string" },
                        "category": { "type": "string" },
                        "description": { "type": "string" },
                        "price": { "type": "number", "minimum": 0 },
                        "stock": { "type": "integer", "minimum": 0 },
                        "image": { "type": "string", "nullable": true }
                    }
                },
                "User": {
                    "type": "object",
                    "required": ["id", "name", "age"],
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "name": { "type": "string" },
                        "age": { "type": "integer", "minimum": 0, "nullable": true }
                    }
                },
                "UserInput": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "age": { "type": "integer", "minimum": 0 }
                    }
                },
                "Error": {
                    "type": "object",
                    "required": ["error", "code", "status", "timestamp"],
                    "properties": {
                        "error": { "type": "string" },
                        "code": { "type": "string" },
                        "status": { "type": "integer" },
                        "timestamp": { "type": "string", "format": "date-time" }
                    }
                }
            }
        }
    })
}
