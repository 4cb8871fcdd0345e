//! Dropdown selector for choosing a recipe.

use crate::fetch;
use crate::state::AppState;
use dioxus::prelude::*;

/// Recipe dropdown selector.
/// A recipe change reloads the Lot stage in select-all mode.
#[component]
pub fn RecipeSelector() -> Element {
    let mut state = use_context::<AppState>();
    let cascade = state.cascade.read().clone();
    let selected = cascade.recipe().to_string();

    let on_change = move |evt: Event<FormData>| {
        let plan = state.cascade.write().select_recipe(evt.value());
        state.error_msg.set(None);
        spawn(fetch::run_chain(state, plan));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "recipe-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Recipe: "
            }
            select {
                id: "recipe-select",
                onchange: on_change,
                for recipe in cascade.recipe_options().iter() {
                    option {
                        value: "{recipe}",
                        selected: *recipe == selected,
                        "{recipe}"
                    }
                }
            }
        }
    }
}
