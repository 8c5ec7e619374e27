//! OpenAPI fragment for the books module. Paths are relative to `/books`.

use serde_json::{json, Value};

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn json_response(description: &str, schema: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": format!("#/components/schemas/{schema}") }
            }
        }
    })
}

fn query_param(name: &str, kind: &str, description: &str) -> Value {
    json!({
        "name": name,
        "in": "query",
        "required": false,
        "description": description,
        "schema": { "type": kind }
    })
}

fn id_param() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "24-character hexadecimal book id",
        "schema": { "type": "string" }
    })
}

fn book_properties() -> Value {
    json!({
        "title": { "type": "string" },
        "author": { "type": "string" },
        "genre": { "type": "string" },
        "publishedYear": { "type": "integer" },
        "price": { "type": "number", "minimum": 0 },
        "description": { "type": "string" },
        "imageUrl": { "type": "string" },
        "bookUrl": { "type": "string" }
    })
}

pub fn document() -> Value {
    let mut book = book_properties();
    book["_id"] = json!({ "type": "string" });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "parameters": [
                        query_param("limit", "integer", "Page size; 0 returns every match"),
                        query_param("page", "integer", "1-based page number"),
                        query_param("sortBy", "string", "title, author, genre, publishedYear or price"),
                        query_param("order", "string", "asc or desc"),
                        query_param("genre", "string", "Case-insensitive substring"),
                        query_param("author", "string", "Case-insensitive substring"),
                        query_param("search", "string", "Matches title, author, genre or description"),
                        query_param("minYear", "integer", "Inclusive lower bound on publishedYear"),
                        query_param("maxYear", "integer", "Inclusive upper bound on publishedYear"),
                        query_param("minPrice", "number", "Inclusive lower bound on price"),
                        query_param("maxPrice", "number", "Inclusive upper bound on price")
                    ],
                    "responses": {
                        "200": json_response("Page of books", "BookList"),
                        "500": error_response("Internal server error")
                    }
                },
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/NewBook" }
                            }
                        }
                    },
                    "responses": {
                        "201": { "description": "Book added" },
                        "422": error_response("Validation error"),
                        "500": error_response("Internal server error")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Fetch a book",
                    "tags": ["Books"],
                    "parameters": [id_param()],
                    "responses": {
                        "200": { "description": "Book fetched" },
                        "400": error_response("Invalid book ID format"),
                        "404": error_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Update a book",
                    "tags": ["Books"],
                    "parameters": [id_param()],
                    "responses": {
                        "200": { "description": "Book updated" },
                        "400": error_response("Invalid book ID format"),
                        "404": error_response("Book not found"),
                        "422": error_response("Validation error")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [id_param()],
                    "responses": {
                        "200": { "description": "Book deleted" },
                        "400": error_response("Invalid book ID format"),
                        "404": error_response("Book not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": book,
                    "required": ["_id", "title", "author", "price"]
                },
                "NewBook": {
                    "type": "object",
                    "properties": book_properties(),
                    "required": ["title", "author", "price"]
                },
                "BookList": {
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" },
                        "count": { "type": "integer" },
                        "books": { "type": "array", "items": { "$ref": "#/components/schemas/Book" } },
                        "totalCount": { "type": "integer" },
                        "currentPage": { "type": "integer" },
                        "totalPages": { "type": "integer" }
                    }
                }
            }
        }
    })
}
