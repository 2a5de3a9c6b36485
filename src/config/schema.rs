use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CATALOGUE_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "options": {
                "type": "array",
                "items": { "$ref": "#/$defs/option" }
            },
            "exclusions": {
                "type": "object",
                "additionalProperties": {
                    "type": "array",
                    "items": { "type": "string", "minLength": 1 }
                }
            },
            "rules": {
                "type": "array",
                "items": { "$ref": "#/$defs/rule" }
            },
            "remediations": {
                "type": "object",
                "additionalProperties": { "type": "string", "minLength": 1 }
            }
        },
        "$defs": {
            "category": {
                "type": "string",
                "enum": ["ports", "ssl", "ssh", "permissions", "software", "database", "network"]
            },
            "option": {
                "type": "object",
                "required": ["fact", "label", "category"],
                "additionalProperties": false,
                "properties": {
                    "fact": { "type": "string", "minLength": 1 },
                    "label": { "type": "string" },
                    "category": { "$ref": "#/$defs/category" }
                }
            },
            "rule": {
                "type": "object",
                "required": [
                    "id", "conditions", "consequence", "severity", "description", "category"
                ],
                "additionalProperties": false,
                "properties": {
                    "id": { "type": "string", "minLength": 1 },
                    "conditions": {
                        "type": "array",
                        "items": { "type": "string", "minLength": 1 }
                    },
                    "consequence": { "type": "string" },
                    "severity": {
                        "type": "string",
                        "enum": ["critical", "dangerous", "warning", "info"]
                    },
                    "description": { "type": "string" },
                    "category": { "$ref": "#/$defs/category" }
                }
            }
        }
    })
});
