use crate::args::MacroArgs;
use crate::derive_utils::apply_derives;
use crate::field_utils::ensure_leading_fields;
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, Type, parse_macro_input};

/// #[entity] 宏实现
/// - 追加字段 `id: Option<IdType>`、`version: Option<Version>` 并置于最前；
///   二者在首次持久化前均为 `None`
/// - 自动实现 `::colaborador_domain::entity::Entity`（id/version）
/// - 参数：`#[entity(id = IdType, debug = true|false)]`，`id` 默认 `String`
///
/// 若结构体已声明 `id`/`version`，其类型须与上述一致。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as MacroArgs);
    if let Err(err) = args.allow(&["id", "debug"]) {
        return err.to_compile_error().into();
    }

    let mut st = match parse_macro_input!(item as Item) {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[entity] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let syn::Fields::Named(fields_named) = &mut st.fields else {
        return syn::Error::new(st.span(), "only supports named-field struct")
            .to_compile_error()
            .into();
    };

    let id_type: Type = args
        .id_ty
        .clone()
        .unwrap_or_else(|| syn::parse_quote! { String });
    let id_field: Type = syn::parse_quote! { ::core::option::Option<#id_type> };
    let version_field: Type =
        syn::parse_quote! { ::core::option::Option<::colaborador_domain::value_object::Version> };
    ensure_leading_fields(
        fields_named,
        &[("id", &id_field), ("version", &version_field)],
    );

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Default),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if args.derive_debug() {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let expanded = quote! {
        #st

        impl #impl_generics ::colaborador_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            fn id(&self) -> ::core::option::Option<&Self::Id> {
                self.id.as_ref()
            }

            fn version(&self) -> ::core::option::Option<::colaborador_domain::value_object::Version> {
                self.version
            }
        }
    };

    TokenStream::from(expanded)
}
