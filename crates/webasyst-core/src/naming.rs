//! Identifier casing rules used in Webasyst class and file names.
//!
//! Webasyst derives PHP class names from lowercase identifiers:
//! an application `myapp` with a backend module gets `myappBackendAction`,
//! a plugin `seo-tools` of `shop` gets `shopSeoToolsPlugin`.

/// Converts a `snake_case` or `kebab-case` identifier to `PascalCase`.
///
/// Every `-` or `_` is dropped and the character after it is uppercased;
/// the first character is uppercased as well. Other characters keep their
/// case.
///
/// # Examples
///
/// ```
/// use webasyst_core::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("seo-tools"), "SeoTools");
/// assert_eq!(to_camel_case("order_list"), "OrderList");
/// assert_eq!(to_camel_case("backend"), "Backend");
/// ```
#[must_use]
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '-' || c == '_' {
            match chars.next() {
                Some(next) => out.extend(next.to_uppercase()),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    capitalize(&out)
}

/// Capitalizes each `_`-separated part of a table or application name.
///
/// # Examples
///
/// ```
/// use webasyst_core::naming::camelize;
///
/// assert_eq!(camelize("custom_items"), "CustomItems");
/// assert_eq!(camelize("shop"), "Shop");
/// ```
#[must_use]
pub fn camelize(s: &str) -> String {
    s.split('_').map(capitalize).collect()
}

/// Uppercases the first character of `s`.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Derives the model class name for `table` owned by `app_id`.
///
/// A leading `<app_id>_` prefix is stripped from the table name (ignoring
/// case) before camelizing, unless that would leave nothing.
///
/// # Examples
///
/// ```
/// use webasyst_core::naming::model_class_name;
///
/// assert_eq!(model_class_name("shop", "shop_product"), "ShopProductModel");
/// assert_eq!(model_class_name("shop", "custom_items"), "ShopCustomItemsModel");
/// ```
#[must_use]
pub fn model_class_name(app_id: &str, table: &str) -> String {
    format!("{}{}Model", camelize(app_id), model_table_part(app_id, table))
}

/// Derives the model file name, e.g. `shopProduct.model.php`.
///
/// # Examples
///
/// ```
/// use webasyst_core::naming::model_file_name;
///
/// assert_eq!(model_file_name("shop", "shop_product"), "shopProduct.model.php");
/// ```
#[must_use]
pub fn model_file_name(app_id: &str, table: &str) -> String {
    format!("{app_id}{}.model.php", model_table_part(app_id, table))
}

fn model_table_part(app_id: &str, table: &str) -> String {
    let prefix_len = app_id.len() + 1;
    let stripped = table
        .get(..prefix_len)
        .filter(|head| head.eq_ignore_ascii_case(&format!("{app_id}_")))
        .map_or(table, |_| &table[prefix_len..]);

    if stripped.is_empty() {
        camelize(table)
    } else {
        camelize(stripped)
    }
}
