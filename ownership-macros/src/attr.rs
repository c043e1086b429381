use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, Ident, Result, Token, Type, parse::Parse, parse::ParseStream};

/// 属性参数中的单个 `key = value`
struct Pair {
    key: Ident,
    value: Expr,
}

impl Parse for Pair {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Ident = input.parse()?;
        let _eq: Token![=] = input.parse()?;
        let value: Expr = input.parse()?;
        Ok(Self { key, value })
    }
}

/// 宏属性参数表：`#[xxx(a = T, b = true)]`
///
/// 按 key 逐个取出并校验类型，`finish` 对剩余（未知）的 key 报错。
pub(crate) struct AttrArgs {
    macro_name: &'static str,
    pairs: Vec<Pair>,
}

impl AttrArgs {
    pub(crate) fn parse(macro_name: &'static str, input: ParseStream) -> Result<Self> {
        let parsed: Punctuated<Pair, Token![,]> = Punctuated::parse_terminated(input)?;
        let mut pairs: Vec<Pair> = Vec::new();
        for pair in parsed {
            if pairs.iter().any(|p| p.key == pair.key) {
                return Err(syn::Error::new(
                    pair.key.span(),
                    format!("duplicate key '{}' in #[{}]", pair.key, macro_name),
                ));
            }
            pairs.push(pair);
        }
        Ok(Self { macro_name, pairs })
    }

    fn take(&mut self, key: &str) -> Option<Pair> {
        let pos = self.pairs.iter().position(|p| p.key == key)?;
        Some(self.pairs.remove(pos))
    }

    /// 取出类型参数，如 `id = ProjectId`
    pub(crate) fn take_type(&mut self, key: &str) -> Result<Option<Type>> {
        match self.take(key) {
            Some(pair) => syn::parse2(pair.value.to_token_stream()).map(Some),
            None => Ok(None),
        }
    }

    /// 取出标识符参数，如 `owner = owner_id`
    pub(crate) fn take_ident(&mut self, key: &str) -> Result<Option<Ident>> {
        match self.take(key) {
            Some(Pair {
                value: Expr::Path(p),
                ..
            }) if p.path.get_ident().is_some() => Ok(p.path.get_ident().cloned()),
            Some(pair) => Err(syn::Error::new(
                pair.value.span(),
                format!("expected field name for '{key}'"),
            )),
            None => Ok(None),
        }
    }

    /// 取出布尔参数，如 `debug = false`
    pub(crate) fn take_bool(&mut self, key: &str) -> Result<Option<bool>> {
        match self.take(key) {
            Some(Pair {
                value:
                    Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Bool(b),
                        ..
                    }),
                ..
            }) => Ok(Some(b.value())),
            Some(pair) => Err(syn::Error::new(
                pair.value.span(),
                format!("expected boolean literal for '{key}'"),
            )),
            None => Ok(None),
        }
    }

    pub(crate) fn finish(self, expected: &str) -> Result<()> {
        match self.pairs.into_iter().next() {
            Some(pair) => Err(syn::Error::new(
                pair.key.span(),
                format!(
                    "unknown key '{}' in #[{}]; expected {}",
                    pair.key, self.macro_name, expected
                ),
            )),
            None => Ok(()),
        }
    }
}
