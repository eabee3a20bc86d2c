use indexmap::IndexMap;

use crate::value::Value;

const DEFAULT_KEY: &str = "DEFAULT";

/// Build a Tailwind `colors` object from CSS variable names.
///
/// `primary-foreground` becomes `primary.foreground`, and every value reads
/// the variable through `hsl(var(--name))`. A color with sub-keys keeps its
/// bare variable under `DEFAULT`, but only when that variable exists.
pub fn theme_colors_from_css_vars(vars: &IndexMap<String, String>) -> Value {
    let mut colors: IndexMap<String, Value> = IndexMap::new();

    for key in vars.keys() {
        let (name, sub) = key.split_once('-').unwrap_or((key.as_str(), ""));
        if sub.is_empty() {
            match colors.get_mut(name) {
                Some(Value::Object(shades)) => {
                    shades.insert(DEFAULT_KEY.to_string(), hsl_var(key));
                }
                _ => {
                    colors.insert(name.to_string(), hsl_var(key));
                }
            }
            continue;
        }

        let entry = colors
            .entry(name.to_string())
            .or_insert_with(|| Value::Object(IndexMap::new()));
        if !entry.is_object() {
            *entry = Value::Object(IndexMap::new());
        }
        if let Value::Object(shades) = entry {
            if shades.is_empty() {
                shades.insert(DEFAULT_KEY.to_string(), hsl_var(name));
            }
            shades.insert(sub.to_string(), hsl_var(key));
        }
    }

    for (name, value) in colors.iter_mut() {
        if let Value::Object(shades) = value {
            let implicit = shades.get(DEFAULT_KEY) == Some(&hsl_var(name));
            if implicit && !vars.contains_key(name) {
                shades.shift_remove(DEFAULT_KEY);
            }
        }
    }

    Value::Object(colors)
}

fn hsl_var(name: &str) -> Value {
    Value::String(format!("hsl(var(--{name}))"))
}
