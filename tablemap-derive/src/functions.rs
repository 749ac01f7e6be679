use crate::record::KeyType;
use syn::{Attribute, Field, Ident, LitStr};

pub(crate) struct FieldAttributes {
    pub name: Option<LitStr>,
    pub key_type: KeyType,
    pub skip: bool,
}

pub(crate) fn get_field_name(field: &Field) -> syn::Result<Ident> {
    match &field.ident {
        Some(ident) => Ok(ident.clone()),
        None => Err(syn::Error::new_spanned(
            field,
            "Could not find a name for one of the fields in your struct",
        )),
    }
}

pub(crate) fn is_tablemap_attribute(attribute: &Attribute) -> bool {
    attribute.path().is_ident("sql")
}

/// Reads `#[sql(table = "..")]` from the struct attributes.
pub(crate) fn get_table_name_from_attributes(
    attributes: &[Attribute],
) -> syn::Result<Option<LitStr>> {
    let mut table_name = None;
    for attribute in attributes.iter().filter(|attr| is_tablemap_attribute(attr)) {
        attribute.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                table_name = Some(non_empty(meta.value()?.parse()?)?);
                Ok(())
            } else {
                Err(meta.error("unsupported sql attribute on a struct, expected `table`"))
            }
        })?;
    }
    Ok(table_name)
}

/// Reads `#[sql(name = "..")]`, `#[sql(primary_key)]` and `#[sql(skip)]` from a field.
pub(crate) fn parse_field_attributes(field: &Field) -> syn::Result<FieldAttributes> {
    let mut attributes = FieldAttributes {
        name: None,
        key_type: KeyType::NoKey,
        skip: false,
    };
    for attribute in field.attrs.iter().filter(|attr| is_tablemap_attribute(attr)) {
        attribute.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                attributes.name = Some(non_empty(meta.value()?.parse()?)?);
            } else if meta.path.is_ident("primary_key") {
                attributes.key_type = KeyType::PrimaryKey;
            } else if meta.path.is_ident("skip") {
                attributes.skip = true;
            } else {
                return Err(meta.error(
                    "unsupported sql attribute on a field, expected `name`, `primary_key` or `skip`",
                ));
            }
            Ok(())
        })?;
    }
    if attributes.skip && attributes.key_type == KeyType::PrimaryKey {
        return Err(syn::Error::new_spanned(
            &field.ident,
            "the primary key cannot be skipped",
        ));
    }
    Ok(attributes)
}

fn non_empty(literal: LitStr) -> syn::Result<LitStr> {
    if literal.value().is_empty() {
        Err(syn::Error::new(literal.span(), "name cannot be empty"))
    } else {
        Ok(literal)
    }
}
