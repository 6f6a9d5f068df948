//
//  bitbucket-provider
//  cli/schema.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Schema listing command.

use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use super::GlobalOptions;
use crate::resources::repository::repository_schema;
use crate::schema::{Attribute, AttributeType, Schema};

/// Show the repository schema
#[derive(Args, Debug)]
pub struct SchemaCommand {}

impl SchemaCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let schema = repository_schema();
        if global.json {
            println!("{}", serde_json::to_string_pretty(&schema)?);
        } else {
            println!("{}", render_table(&schema));
        }
        Ok(())
    }
}

fn mode(attribute: &Attribute) -> &'static str {
    match (attribute.required, attribute.optional, attribute.computed) {
        (true, _, _) => "required",
        (false, true, true) => "optional, computed",
        (false, true, false) => "optional",
        _ => "computed",
    }
}

fn type_name(attribute: &Attribute) -> String {
    match (&attribute.kind, attribute.max_items) {
        (AttributeType::String, _) => "string".to_string(),
        (AttributeType::Bool, _) => "bool".to_string(),
        (AttributeType::List(_), Some(max)) => format!("block (max {})", max),
        (AttributeType::List(_), None) => "block".to_string(),
    }
}

fn render_table(schema: &Schema) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Attribute", "Type", "Mode", "Default", "Description"]);

    for (path, attribute) in schema.paths() {
        let name = if attribute.required {
            Cell::new(path).fg(Color::Yellow)
        } else {
            Cell::new(path)
        };
        let default = attribute
            .default
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            name,
            Cell::new(type_name(attribute)),
            Cell::new(mode(attribute)),
            Cell::new(default),
            Cell::new(attribute.description),
        ]);
    }

    table
}
