use crate::{error::AppError, models::TodoItemDto, services::TodoService};
use actix_web::{delete, get, http::header, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// Lists every todo item.
///
/// ## Responses:
/// - `200 OK`: JSON array of `TodoItemDto`, in store order.
/// - `500 Internal Server Error`: storage failure.
#[get("")]
pub async fn get_todos(service: web::Data<TodoService>) -> Result<impl Responder, AppError> {
    let todos = service.list().await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Retrieves a single todo item by id.
///
/// ## Responses:
/// - `200 OK`: the `TodoItemDto`.
/// - `404 Not Found`: no item with that id.
#[get("/{id}")]
pub async fn get_todo(
    service: web::Data<TodoService>,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let todo = service.get(todo_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Creates a todo item.
///
/// The body's `id` and `createDate` are ignored; the server assigns both.
///
/// ## Responses:
/// - `201 Created`: the stored `TodoItemDto`, with `Location: /api/todo/{id}`.
/// - `400 Bad Request`: malformed JSON or a field failed validation.
#[post("")]
pub async fn create_todo(
    service: web::Data<TodoService>,
    todo_data: web::Json<TodoItemDto>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let created = service.create(todo_data.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/todo/{}", created.id)))
        .json(created))
}

/// Replaces the title, description and completion flag of an item.
///
/// ## Responses:
/// - `204 No Content`: updated.
/// - `400 Bad Request`: body id differs from the path id, or validation failed.
/// - `404 Not Found`: no item with that id.
#[put("/{id}")]
pub async fn update_todo(
    service: web::Data<TodoService>,
    todo_id: web::Path<i32>,
    todo_data: web::Json<TodoItemDto>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    service
        .update(todo_id.into_inner(), todo_data.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Deletes a todo item.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `404 Not Found`: no item with that id.
#[delete("/{id}")]
pub async fn delete_todo(
    service: web::Data<TodoService>,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    service.delete(todo_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
