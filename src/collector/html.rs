use log::debug;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::model::{
    default_ingredient_section, default_instruction_section, IngredientSection,
    InstructionSection, RecipeRecord,
};

static TITLE: Lazy<Selector> = Lazy::new(|| parse_selector("h1.entry-title"));
static INGREDIENTS: Lazy<Selector> = Lazy::new(|| parse_selector("div.mv-create-ingredients"));
static INSTRUCTIONS: Lazy<Selector> = Lazy::new(|| parse_selector("div.mv-create-instructions"));
static LIST_ITEM: Lazy<Selector> = Lazy::new(|| parse_selector("li"));

fn parse_selector(selector: &str) -> Selector {
    Selector::parse(selector).expect("static selector is valid")
}

/// Extract a record from a page carrying a Mediavine Create recipe card.
///
/// Inside each card container an `h4` opens a new section and the
/// following list contributes its items. Returns `None` when the page has
/// neither an ingredients nor an instructions container.
pub fn extract_record(html: &str, url: &str) -> Option<RecipeRecord> {
    let document = Html::parse_document(html);

    let ingredients_div = document.select(&INGREDIENTS).next();
    let instructions_div = document.select(&INSTRUCTIONS).next();
    if ingredients_div.is_none() && instructions_div.is_none() {
        debug!("No recipe card containers at {}", url);
        return None;
    }

    let title = document
        .select(&TITLE)
        .next()
        .map(element_text)
        .filter(|title| !title.is_empty());

    let ingredients = ingredients_div
        .map(|div| {
            grouped_items(div, "ul", default_ingredient_section())
                .into_iter()
                .map(|(section, items)| IngredientSection { section, items })
                .collect()
        })
        .unwrap_or_default();

    let instructions = instructions_div
        .map(|div| {
            grouped_items(div, "ol", default_instruction_section())
                .into_iter()
                .map(|(section, steps)| InstructionSection { section, steps })
                .collect()
        })
        .unwrap_or_default();

    Some(RecipeRecord {
        title,
        url: url.to_string(),
        ingredients,
        instructions,
    })
}

/// Walk the direct children of a card container, grouping the `li` text
/// of each `list_tag` element under the most recent `h4` heading.
/// Groups that end up empty are dropped.
fn grouped_items(
    container: ElementRef<'_>,
    list_tag: &str,
    first_label: String,
) -> Vec<(String, Vec<String>)> {
    let mut groups = Vec::new();
    let mut current = (first_label, Vec::new());

    for child in container.children().filter_map(ElementRef::wrap) {
        let tag = child.value().name();
        if tag == "h4" {
            let finished = std::mem::replace(&mut current, (element_text(child), Vec::new()));
            if !finished.1.is_empty() {
                groups.push(finished);
            }
        } else if tag == list_tag {
            current.1.extend(
                child
                    .select(&LIST_ITEM)
                    .map(element_text)
                    .filter(|item| !item.is_empty()),
            );
        }
    }

    if !current.1.is_empty() {
        groups.push(current);
    }
    groups
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
