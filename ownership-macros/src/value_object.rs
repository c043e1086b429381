use crate::attr::AttrArgs;
use crate::derives::DeriveSet;
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, Result, parse::Parse, parse::ParseStream};

/// #[value_object] 宏实现
/// - 支持结构体（具名或 tuple）与枚举
/// - 合并派生：Clone, Serialize, Deserialize, PartialEq, Eq
/// - 参数：`debug = bool`（默认 true）、`default = bool`（默认 false，枚举需标注 `#[default]` 变体）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = syn::parse_macro_input!(attr as ValueObjectArgs);
    let mut input = syn::parse_macro_input!(item as Item);

    let derives = DeriveSet::new(vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
    ])
    .with(cfg.default.unwrap_or(false), syn::parse_quote!(Default))
    .with(cfg.debug.unwrap_or(true), syn::parse_quote!(Debug));

    match &mut input {
        Item::Struct(st) => derives.apply(&mut st.attrs),
        Item::Enum(en) => derives.apply(&mut en.attrs),
        other => {
            return syn::Error::new(other.span(), "#[value_object] only supports struct or enum")
                .to_compile_error()
                .into();
        }
    }

    TokenStream::from(quote! { #input })
}

struct ValueObjectArgs {
    debug: Option<bool>,
    default: Option<bool>,
}

impl Parse for ValueObjectArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = AttrArgs::parse("value_object", input)?;
        let cfg = Self {
            debug: args.take_bool("debug")?,
            default: args.take_bool("default")?,
        };
        args.finish("'debug' | 'default'")?;
        Ok(cfg)
    }
}
