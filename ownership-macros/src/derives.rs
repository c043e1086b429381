use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::{Attribute, Path, Token};

/// 宏要求的 derive 集合；与用户已写的 `#[derive(...)]` 合并去重
pub(crate) struct DeriveSet {
    required: Vec<Path>,
}

impl DeriveSet {
    pub(crate) fn new(required: Vec<Path>) -> Self {
        Self { required }
    }

    pub(crate) fn with(mut self, enabled: bool, path: Path) -> Self {
        if enabled {
            self.required.insert(0, path);
        }
        self
    }

    /// 把所有 derive 收敛成一个属性并放在最前，其余属性保持原顺序
    pub(crate) fn apply(self, attrs: &mut Vec<Attribute>) {
        let mut retained = Vec::new();
        let mut paths = self.required;
        let mut keys: Vec<String> = paths.iter().map(derive_key).collect();

        for attr in attrs.drain(..) {
            if !attr.path().is_ident("derive") {
                retained.push(attr);
                continue;
            }
            let Ok(list) =
                attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)
            else {
                retained.push(attr);
                continue;
            };
            for p in list {
                let key = derive_key(&p);
                if !keys.contains(&key) {
                    keys.push(key);
                    paths.push(p);
                }
            }
        }

        let merged: Attribute = syn::parse_quote!(#[derive(#(#paths),*)]);
        *attrs = std::iter::once(merged).chain(retained).collect();
    }
}

// Serialize 与 serde::Serialize 视为同一个 derive
fn derive_key(p: &Path) -> String {
    match p.segments.last() {
        Some(last) if last.ident == "Serialize" || last.ident == "Deserialize" => {
            format!("serde::{}", last.ident)
        }
        Some(last) => last.ident.to_string(),
        None => p.to_token_stream().to_string(),
    }
}
