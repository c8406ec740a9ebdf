use proc_macro2::Span;
use quote::ToTokens;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, ExprLit, Lit, MetaNameValue, Result, Token, Type};

/// 宏参数：`key = value` 列表
/// - `id = Type`：实体标识类型
/// - `debug = bool`：是否派生 Debug
/// - `ordered = bool`：是否追加 Copy/PartialOrd/Ord/Hash（用于可比较的值对象）
#[derive(Default)]
pub(crate) struct MacroArgs {
    pub(crate) id_ty: Option<Type>,
    pub(crate) debug: Option<bool>,
    pub(crate) ordered: Option<bool>,
    seen: Vec<(String, Span)>,
}

impl MacroArgs {
    /// 校验参数只包含当前宏允许的 key
    pub(crate) fn allow(&self, keys: &[&str]) -> Result<()> {
        for (key, span) in &self.seen {
            if !keys.contains(&key.as_str()) {
                return Err(syn::Error::new(
                    *span,
                    format!("unknown key '{key}' in attribute; expected one of {keys:?}"),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn derive_debug(&self) -> bool {
        self.debug.unwrap_or(true)
    }

    pub(crate) fn ordered(&self) -> bool {
        self.ordered.unwrap_or(false)
    }
}

impl Parse for MacroArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = Self::default();
        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated(input)?;

        for pair in pairs {
            let Some(ident) = pair.path.get_ident() else {
                return Err(syn::Error::new(pair.path.span(), "expected a plain key"));
            };
            let key = ident.to_string();
            if args.seen.iter().any(|(k, _)| *k == key) {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("duplicate key '{key}' in attribute"),
                ));
            }

            match key.as_str() {
                "id" => {
                    let ty: Type = syn::parse2(pair.value.to_token_stream())?;
                    args.id_ty = Some(ty);
                }
                "debug" => args.debug = Some(bool_literal(&pair.value, &key)?),
                "ordered" => args.ordered = Some(bool_literal(&pair.value, &key)?),
                _ => {}
            }
            args.seen.push((key, ident.span()));
        }

        Ok(args)
    }
}

fn bool_literal(expr: &Expr, key: &str) -> Result<bool> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Bool(b), ..
        }) => Ok(b.value()),
        other => Err(syn::Error::new(
            other.span(),
            format!("expected boolean literal for '{key}'"),
        )),
    }
}
