//! OpenAPI document assembled from module fragments

use serde_json::{json, Value};

use bookshelf_kernel::ModuleRegistry;

/// Path under which a module route is served, e.g. `/books` + `/{bookId}`
pub fn mount_path(module_name: &str, path: &str) -> String {
    match path {
        "" | "/" => format!("/{}", module_name),
        other => format!("/{}{}", module_name, other),
    }
}

/// Build the merged OpenAPI document for every registered module
pub fn openapi_document(registry: &ModuleRegistry) -> Value {
    let mut openapi_spec = json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Bookshelf API",
            "version": "1.0.0",
            "description": "In-memory bookshelf record keeping"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    // Common response envelope schema
    openapi_spec["components"]["schemas"]["Envelope"] = json!({
        "type": "object",
        "properties": {
            "status": {
                "type": "string",
                "enum": ["success", "fail"]
            },
            "message": {
                "type": "string"
            },
            "data": {
                "type": "object"
            }
        },
        "required": ["status"]
    });

    openapi_spec["paths"]["/healthz"] = json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": {
                            "schema": {
                                "type": "string"
                            }
                        }
                    }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };

        if let Some(paths) = module_spec.get("paths").and_then(Value::as_object) {
            for (path, path_item) in paths {
                openapi_spec["paths"][mount_path(module.name(), path)] = path_item.clone();
            }
        }

        if let Some(schemas) = module_spec
            .get("components")
            .and_then(|components| components.get("schemas"))
            .and_then(Value::as_object)
        {
            for (schema_name, schema_def) in schemas {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}
