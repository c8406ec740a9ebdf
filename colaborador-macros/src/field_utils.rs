use proc_macro2::Span;
use syn::punctuated::Punctuated;
use syn::{Field, FieldsNamed, Ident, Token, Type};

/// 确保具名字段结构体包含 `required` 中的字段，并按给定顺序置于最前
/// - 已存在的同名字段原样复用（保留其可见性与属性）
/// - 缺失的字段以私有字段补齐
/// - 其余字段保持原始相对顺序
pub(crate) fn ensure_leading_fields(fields_named: &mut FieldsNamed, required: &[(&str, &Type)]) {
    let is_named = |f: &Field, name: &str| f.ident.as_ref().is_some_and(|i| i == name);

    let mut rest: Vec<Field> = Vec::new();
    let mut found: Vec<Option<Field>> = vec![None; required.len()];
    for field in std::mem::take(&mut fields_named.named) {
        match required.iter().position(|(name, _)| is_named(&field, name)) {
            Some(idx) => found[idx] = Some(field),
            None => rest.push(field),
        }
    }

    let mut named: Punctuated<Field, Token![,]> = Punctuated::new();
    for ((name, ty), existing) in required.iter().zip(found) {
        let field = existing.unwrap_or_else(|| {
            let ident = Ident::new(name, Span::call_site());
            syn::parse_quote! { #ident: #ty }
        });
        named.push(field);
    }
    named.extend(rest);

    fields_named.named = named;
}
