use crate::derives::DeriveSet;
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, ItemStruct, Result, Type};

/// #[entity_id] 宏实现
/// 仅支持单字段 tuple struct（如 `struct ProjectId(Uuid);`），为包装类型：
/// - 合并派生：Default, Clone, Copy(内部为 Uuid 时), Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord
/// - 提供 new / Display / FromStr / AsRef / From 双向转换
/// - 内部为 `Uuid` 时额外提供 `generate()`（v4）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[entity_id] takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let input = syn::parse_macro_input!(item as Item);
    let out = match input {
        Item::Struct(st) => expand_newtype(st),
        other => Err(syn::Error::new(other.span(), "#[entity_id] only on struct")),
    };

    match out {
        Ok(ts) => ts.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_newtype(mut st: ItemStruct) -> Result<proc_macro2::TokenStream> {
    let inner_ty: Type = match &st.fields {
        syn::Fields::Unnamed(f) if f.unnamed.len() == 1 => f.unnamed[0].ty.clone(),
        other => {
            return Err(syn::Error::new(
                other.span(),
                "#[entity_id] requires a tuple struct with exactly one field, e.g. struct X(Uuid);",
            ));
        }
    };

    let is_uuid = last_segment_is(&inner_ty, "Uuid");

    DeriveSet::new(vec![
        syn::parse_quote!(Default),
        syn::parse_quote!(Clone),
        syn::parse_quote!(Debug),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
        syn::parse_quote!(Hash),
        syn::parse_quote!(PartialOrd),
        syn::parse_quote!(Ord),
    ])
    .with(is_uuid, syn::parse_quote!(Copy))
    .apply(&mut st.attrs);

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let generate = is_uuid.then(|| {
        quote! {
            /// 生成新的随机标识（UUID v4）
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4())
            }
        }
    });

    Ok(quote! {
        #st

        impl #impl_generics #ident #ty_generics #where_clause {
            pub fn new(value: #inner_ty) -> Self {
                Self(value)
            }

            #generate
        }

        impl #impl_generics ::std::str::FromStr for #ident #ty_generics #where_clause {
            type Err = <#inner_ty as ::std::str::FromStr>::Err;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                s.parse::<#inner_ty>().map(Self)
            }
        }

        impl #impl_generics ::std::fmt::Display for #ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl #impl_generics ::core::convert::AsRef<#inner_ty> for #ident #ty_generics #where_clause {
            fn as_ref(&self) -> &#inner_ty {
                &self.0
            }
        }

        impl #impl_generics ::core::convert::From<#inner_ty> for #ident #ty_generics #where_clause {
            fn from(value: #inner_ty) -> Self {
                Self(value)
            }
        }

        impl #impl_generics ::core::convert::From<#ident #ty_generics> for #inner_ty #where_clause {
            fn from(value: #ident #ty_generics) -> Self {
                value.0
            }
        }
    })
}

fn last_segment_is(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(p) => p.path.segments.last().is_some_and(|s| s.ident == name),
        _ => false,
    }
}
