//! Output formatting for categories command results.

use super::execute::CategoriesResult;
use crate::output::Outputable;

impl Outputable for CategoriesResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        match &self.query {
            Some(q) => lines.push(format!("Categories matching: {}", q)),
            None => lines.push("Categories".to_string()),
        }
        lines.push(String::new());

        if self.categories.is_empty() {
            lines.push("No categories found.".to_string());
            return lines.join("\n");
        }

        lines.push(format!("Found {}:", self.categories.len()));
        for category in &self.categories {
            let state = if category.active { "" } else { " (inactive)" };
            lines.push(format!(
                "  [{}] {} {}{}",
                category.id, category.name, category.color, state
            ));
            if !category.description.is_empty() {
                lines.push(format!("       {}", category.description));
            }
        }

        lines.join("\n")
    }
}
