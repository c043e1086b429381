use crate::attr::AttrArgs;
use crate::derives::DeriveSet;
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Field, Ident, Item, Result, Token, Type, parse::Parse, parse::ParseStream};

/// #[entity] 宏实现
/// - 字段最前放置 `id: IdType`、`version: usize`（已存在则复用原定义）
/// - 派生 Default/Clone/Serialize/Deserialize（`debug = false` 时不派生 Debug）
/// - 实现 `::ownership_domain::entity::Entity`
/// - 指定 `owner = field` 时额外实现 `::ownership_domain::ownership::Owned`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = syn::parse_macro_input!(attr as EntityArgs);
    let input = syn::parse_macro_input!(item as Item);

    match expand_struct(cfg, input) {
        Ok(ts) => ts.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_struct(cfg: EntityArgs, input: Item) -> Result<proc_macro2::TokenStream> {
    let mut st = match input {
        Item::Struct(s) => s,
        other => return Err(syn::Error::new(other.span(), "#[entity] only on struct")),
    };

    let syn::Fields::Named(fields_named) = &mut st.fields else {
        return Err(syn::Error::new(
            st.span(),
            "#[entity] only supports named-field struct",
        ));
    };

    let id_type = cfg.id.unwrap_or_else(|| syn::parse_quote! { String });
    let version_type: Type = syn::parse_quote! { usize };

    // id、version 置顶，其余字段保持原有相对顺序
    let mut reordered: Punctuated<Field, Token![,]> = Punctuated::new();
    for (name, ty) in [("id", &id_type), ("version", &version_type)] {
        match fields_named.named.iter().find(|f| is_named(f, name)) {
            Some(existing) => reordered.push(existing.clone()),
            None => {
                let ident = Ident::new(name, proc_macro2::Span::call_site());
                reordered.push(syn::parse_quote! { #ident: #ty });
            }
        }
    }
    for f in fields_named.named.iter() {
        if !is_named(f, "id") && !is_named(f, "version") {
            reordered.push(f.clone());
        }
    }
    fields_named.named = reordered;

    if let Some(owner) = &cfg.owner {
        let name = owner.to_string();
        if !fields_named.named.iter().any(|f| is_named(f, &name)) {
            return Err(syn::Error::new(
                owner.span(),
                format!("owner field '{owner}' not found on struct"),
            ));
        }
    }

    DeriveSet::new(vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(Default),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ])
    .with(cfg.debug.unwrap_or(true), syn::parse_quote!(Debug))
    .apply(&mut st.attrs);

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let owned_impl = cfg.owner.as_ref().map(|owner| {
        quote! {
            impl #impl_generics ::ownership_domain::ownership::Owned for #ident #ty_generics #where_clause {
                fn owner_id(&self) -> &::ownership_domain::identity::UserId {
                    &self.#owner
                }
            }
        }
    });

    Ok(quote! {
        #st

        impl #impl_generics ::ownership_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            fn new(id: Self::Id) -> Self {
                Self { id, version: 0, ..::core::default::Default::default() }
            }

            fn id(&self) -> &Self::Id {
                &self.id
            }

            fn version(&self) -> usize {
                self.version
            }
        }

        #owned_impl
    })
}

fn is_named(field: &Field, name: &str) -> bool {
    field.ident.as_ref().is_some_and(|i| i == name)
}

struct EntityArgs {
    id: Option<Type>,
    owner: Option<Ident>,
    debug: Option<bool>,
}

impl Parse for EntityArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = AttrArgs::parse("entity", input)?;
        let cfg = Self {
            id: args.take_type("id")?,
            owner: args.take_ident("owner")?,
            debug: args.take_bool("debug")?,
        };
        args.finish("'id' | 'owner' | 'debug'")?;
        Ok(cfg)
    }
}
