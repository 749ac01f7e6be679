use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::ext::IdentExt;
use syn::{parse_quote, DeriveInput, Ident, LitStr, Type};

#[derive(Debug, Eq, PartialEq)]
pub(crate) enum KeyType {
    PrimaryKey,
    NoKey,
}

pub(crate) struct StructFieldData {
    pub ident: Ident,
    pub rename: Option<LitStr>,
    pub key_type: KeyType,
    pub ty: Type,
}

impl ToTokens for StructFieldData {
    /// Emits the `ColumnDef` describing this field.
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = self.ident.unraw().to_string();
        tokens.extend(quote!(::tablemap::ColumnDef::new(#name)));
        if let Some(rename) = &self.rename {
            tokens.extend(quote!(.renamed(#rename)));
        }
        if self.key_type == KeyType::PrimaryKey {
            tokens.extend(quote!(.primary_key()));
        }
    }
}

pub(crate) fn build_record_implementation(
    input: &DeriveInput,
    table_name: Option<LitStr>,
    field_list: &[StructFieldData],
) -> TokenStream {
    let name = &input.ident;
    let name_string = name.unraw().to_string();
    let generics = record_generics(input, field_list);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let table_name = match table_name {
        Some(table_name) => quote!(::core::option::Option::Some(#table_name)),
        None => quote!(::core::option::Option::None),
    };
    let field_idents = field_list.iter().map(|field| &field.ident);

    quote!(
        impl #impl_generics ::tablemap::Record for #name #ty_generics #where_clause {

            #[inline]
            fn type_name() -> &'static str {
                #name_string
            }

            #[inline]
            fn table_name() -> ::core::option::Option<&'static str> {
                #table_name
            }

            fn columns() -> &'static [::tablemap::ColumnDef] {
                const COLUMNS: &[::tablemap::ColumnDef] = &[#(#field_list),*];
                COLUMNS
            }

            fn values(&self) -> ::std::vec::Vec<::tablemap::Value> {
                ::std::vec![#(::tablemap::ToValue::to_value(&self.#field_idents)),*]
            }
        }
    )
}

/// Generic records need every type parameter to be `'static` and every field to convert into a value.
fn record_generics(input: &DeriveInput, field_list: &[StructFieldData]) -> syn::Generics {
    let mut generics = input.generics.clone();
    if generics.params.is_empty() {
        return generics;
    }
    let type_params: Vec<Ident> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let lifetimes: Vec<syn::Lifetime> = generics
        .lifetimes()
        .map(|param| param.lifetime.clone())
        .collect();
    let where_clause = generics.make_where_clause();
    for lifetime in lifetimes {
        where_clause.predicates.push(parse_quote!(#lifetime: 'static));
    }
    for ident in type_params {
        where_clause.predicates.push(parse_quote!(#ident: 'static));
    }
    for field in field_list {
        let ty = &field.ty;
        where_clause
            .predicates
            .push(parse_quote!(#ty: ::tablemap::ToValue));
    }
    generics
}
