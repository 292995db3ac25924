use darling::{FromDeriveInput, FromMeta};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Data, DeriveInput, Fields, Generics, Ident, Path};

/// Values we can parse from #[resource(attrs)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(resource), supports(struct_named))]
struct ResourceAttrs {
    ident: Ident,
    generics: Generics,

    #[darling(default)]
    group: String,
    version: String,
    kind: Option<String>,
    plural: Option<String>,
    #[darling(default)]
    namespaced: bool,
    #[darling(default)]
    cluster: bool,
    #[darling(default)]
    crates: Crates,
}

#[derive(Debug, FromMeta)]
struct Crates {
    #[darling(default = "Self::default_kubent_core")]
    kubent_core: Path,
}

impl Default for Crates {
    fn default() -> Self {
        Self {
            kubent_core: Self::default_kubent_core(),
        }
    }
}

impl Crates {
    fn default_kubent_core() -> Path {
        parse_quote! { ::kubent::core } // by default must work well with people using facade crate
    }
}

fn has_metadata_field(ast: &DeriveInput) -> bool {
    match &ast.data {
        Data::Struct(s) => match &s.fields {
            Fields::Named(fields) => fields
                .named
                .iter()
                .any(|f| f.ident.as_ref().is_some_and(|i| i == "metadata")),
            _ => false,
        },
        _ => false,
    }
}

pub(crate) fn derive(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = match syn::parse2(input) {
        Err(err) => return err.to_compile_error(),
        Ok(di) => di,
    };
    let ResourceAttrs {
        ident,
        generics,
        group,
        version,
        kind,
        plural,
        namespaced,
        cluster,
        crates: Crates { kubent_core },
    } = match ResourceAttrs::from_derive_input(&ast) {
        Err(err) => return err.write_errors(),
        Ok(attrs) => attrs,
    };

    if namespaced && cluster {
        return syn::Error::new_spanned(&ident, "#[resource] accepts only one of `namespaced` or `cluster`")
            .to_compile_error();
    }
    if !has_metadata_field(&ast) {
        return syn::Error::new_spanned(&ident, "#[derive(Resource)] requires a `metadata: ObjectMeta` field")
            .to_compile_error();
    }

    let type_name = ident.to_string();
    let kind = match kind {
        Some(k) => quote! { ::core::option::Option::Some(#k) },
        None => quote! { ::core::option::Option::None },
    };
    let plural = match plural {
        Some(p) => quote! { ::core::option::Option::Some(#p) },
        None => quote! { ::core::option::Option::None },
    };
    let scope = if cluster {
        quote! { #kubent_core::EntityScope::Cluster }
    } else {
        quote! { #kubent_core::EntityScope::Namespaced }
    };
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #kubent_core::Resource for #ident #ty_generics #where_clause {
            const ENTITY: #kubent_core::EntityAttributes = #kubent_core::EntityAttributes {
                type_name: #type_name,
                group: #group,
                version: #version,
                kind: #kind,
                plural: #plural,
                scope: #scope,
            };

            fn meta(&self) -> &#kubent_core::ObjectMeta {
                &self.metadata
            }

            fn meta_mut(&mut self) -> &mut #kubent_core::ObjectMeta {
                &mut self.metadata
            }
        }
    }
}
