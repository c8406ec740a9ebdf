use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::{Attribute, Path, Token};

/// 将 `required` 与目标上已有的 `#[derive(..)]` 合并为单个 derive 属性并置于最前
/// - 去重时 `Serialize` 与 `serde::Serialize` 视为同一项
/// - 无法解析的 derive 属性原样保留
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<Path>) {
    let mut existing: Vec<Path> = Vec::new();
    let mut retained: Vec<Attribute> = Vec::new();

    for attr in attrs.drain(..) {
        if !attr.path().is_ident("derive") {
            retained.push(attr);
            continue;
        }
        match attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated) {
            Ok(list) => existing.extend(list),
            Err(_) => retained.push(attr),
        }
    }

    let mut keys: Vec<String> = Vec::new();
    let mut merged: Vec<Path> = Vec::new();
    for path in required.into_iter().chain(existing) {
        let key = derive_key(&path);
        if !keys.contains(&key) {
            keys.push(key);
            merged.push(path);
        }
    }

    attrs.push(syn::parse_quote!(#[derive(#(#merged),*)]));
    attrs.extend(retained);
}

fn derive_key(path: &Path) -> String {
    match path.segments.last() {
        Some(last) => last.ident.to_string(),
        None => path.to_token_stream().to_string(),
    }
}
