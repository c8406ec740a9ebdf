use crate::args::MacroArgs;
use crate::derive_utils::apply_derives;
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, parse_macro_input};

/// #[value_object] 宏实现
/// - 支持结构体（具名或 tuple）与枚举
/// - 合并派生：Default, Clone, (Debug 可控), Serialize, Deserialize, PartialEq, Eq
/// - `ordered = true` 时追加 Copy, PartialOrd, Ord, Hash
/// - 参数：`#[value_object(debug = true|false, ordered = true|false)]`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as MacroArgs);
    if let Err(err) = args.allow(&["debug", "ordered"]) {
        return err.to_compile_error().into();
    }
    let mut input = parse_macro_input!(item as Item);

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Default),
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
    ];
    if args.derive_debug() {
        required.insert(0, syn::parse_quote!(Debug));
    }
    if args.ordered() {
        required.extend([
            syn::parse_quote!(Copy),
            syn::parse_quote!(PartialOrd),
            syn::parse_quote!(Ord),
            syn::parse_quote!(Hash),
        ]);
    }

    match &mut input {
        Item::Struct(st) => apply_derives(&mut st.attrs, required),
        Item::Enum(en) => apply_derives(&mut en.attrs, required),
        other => {
            return syn::Error::new(other.span(), "#[value_object] only supports struct or enum")
                .to_compile_error()
                .into();
        }
    }

    TokenStream::from(quote! { #input })
}
