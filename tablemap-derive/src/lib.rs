extern crate proc_macro;

mod functions;
mod record;

use crate::functions::*;
use crate::record::*;
use syn::{parse_macro_input, Data::Struct, DeriveInput, Fields};

/// Automatically implements the `Record` trait for a given struct.
#[proc_macro_derive(Record, attributes(sql))]
pub fn record(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let derive_input = parse_macro_input!(input as DeriveInput);
    match expand_record(&derive_input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_record(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                format!("Deriving on {}, which is not a struct, is not supported", name),
            ))
        }
    };

    let table_name = get_table_name_from_attributes(&input.attrs)?;

    let mut fields_info: Vec<StructFieldData> = Vec::new();
    let mut primary_key_seen = false;
    for field in fields {
        let attributes = parse_field_attributes(field)?;
        if attributes.skip {
            continue;
        }
        if attributes.key_type == KeyType::PrimaryKey {
            if primary_key_seen {
                return Err(syn::Error::new_spanned(
                    &field.ident,
                    "only one field can be marked with #[sql(primary_key)]",
                ));
            }
            primary_key_seen = true;
        }
        fields_info.push(StructFieldData {
            ident: get_field_name(field)?,
            rename: attributes.name,
            key_type: attributes.key_type,
            ty: field.ty.clone(),
        });
    }

    Ok(build_record_implementation(input, table_name, &fields_info))
}
