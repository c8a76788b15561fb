//! Storage operations for tags.

use crate::{
    Error, RecordId,
    label::{LabelName, ensure_unique},
    receipt::{Receipt, get_all_receipts},
    store::{RecordStore, StorageKey, read_collection, write_collection},
    tag::{Tag, TagUsage},
};

/// Retrieve all tags, newest first.
pub fn get_all_tags(store: &impl RecordStore) -> Result<Vec<Tag>, Error> {
    read_collection(StorageKey::Tags, store)
}

/// Retrieve a single tag by ID.
pub fn get_tag(id: &RecordId, store: &impl RecordStore) -> Result<Option<Tag>, Error> {
    Ok(get_all_tags(store)?.into_iter().find(|tag| &tag.id == id))
}

/// Create a tag and store it in front of the others.
///
/// # Errors
/// Returns [Error::EmptyLabelName] for a blank name and
/// [Error::DuplicateLabelName] if the name is taken, ignoring case.
pub fn add_tag(name: &str, store: &mut impl RecordStore) -> Result<Tag, Error> {
    let name = LabelName::new(name)?;
    let mut tags = get_all_tags(store)?;
    ensure_unique(&name, tags.iter().map(|tag| &tag.name))?;

    let tag = Tag {
        id: RecordId::new(),
        name,
    };
    tags.insert(0, tag.clone());
    write_collection(StorageKey::Tags, &tags, store)?;

    tracing::info!("Created tag \"{}\"", tag.name);
    Ok(tag)
}

/// Rename a tag and replace its old name in every receipt's tag list.
///
/// Returns `Ok(None)` and changes nothing if there is no tag with ID `id`.
///
/// # Errors
/// Returns [Error::EmptyLabelName] for a blank name and
/// [Error::DuplicateLabelName] if another tag has the name, ignoring case.
pub fn rename_tag(
    id: &RecordId,
    new_name: &str,
    store: &mut impl RecordStore,
) -> Result<Option<Tag>, Error> {
    let new_name = LabelName::new(new_name)?;
    let mut tags = get_all_tags(store)?;

    let Some(position) = tags.iter().position(|tag| &tag.id == id) else {
        tracing::debug!("Ignoring rename of missing tag {id}");
        return Ok(None);
    };

    ensure_unique(
        &new_name,
        tags.iter().filter(|tag| &tag.id != id).map(|tag| &tag.name),
    )?;

    let tag = &mut tags[position];
    let old_name = std::mem::replace(&mut tag.name, new_name.clone());
    let renamed = tag.clone();
    write_collection(StorageKey::Tags, &tags, store)?;

    rewrite_receipt_tags(old_name.as_ref(), Some(new_name.as_ref()), store)?;

    tracing::info!("Renamed tag \"{old_name}\" to \"{new_name}\"");
    Ok(Some(renamed))
}

/// Delete a tag and remove its name from every receipt's tag list.
///
/// Returns `Ok(None)` and changes nothing if there is no tag with ID `id`.
pub fn delete_tag(id: &RecordId, store: &mut impl RecordStore) -> Result<Option<Tag>, Error> {
    let mut tags = get_all_tags(store)?;

    let Some(position) = tags.iter().position(|tag| &tag.id == id) else {
        tracing::debug!("Ignoring delete of missing tag {id}");
        return Ok(None);
    };

    let deleted = tags.remove(position);
    write_collection(StorageKey::Tags, &tags, store)?;

    rewrite_receipt_tags(deleted.name.as_ref(), None, store)?;

    tracing::info!("Deleted tag \"{}\"", deleted.name);
    Ok(Some(deleted))
}

/// Count how many times receipts use each stored tag.
pub fn get_tag_usage(store: &impl RecordStore) -> Result<Vec<TagUsage>, Error> {
    let tags = get_all_tags(store)?;
    let receipts = get_all_receipts(store)?;

    Ok(count_tag_usage(tags, &receipts))
}

/// Count how many times `receipts` use each of `tags`, keeping the order of `tags`.
pub fn count_tag_usage(tags: Vec<Tag>, receipts: &[Receipt]) -> Vec<TagUsage> {
    tags.into_iter()
        .map(|tag| {
            let receipt_count = receipts
                .iter()
                .flat_map(|receipt| receipt.tag_names())
                .filter(|name| name.as_str() == tag.name.as_ref())
                .count();

            TagUsage { tag, receipt_count }
        })
        .collect()
}

/// Replace `old_name` with `new_name` in every receipt's tags, or remove it
/// when `new_name` is `None`.
fn rewrite_receipt_tags(
    old_name: &str,
    new_name: Option<&str>,
    store: &mut impl RecordStore,
) -> Result<(), Error> {
    let mut receipts = get_all_receipts(store)?;
    let mut rewritten = 0;

    for tags in receipts.iter_mut().filter_map(|receipt| receipt.tags.as_mut()) {
        if !tags.iter().any(|tag| tag == old_name) {
            continue;
        }

        match new_name {
            Some(new_name) => tags
                .iter_mut()
                .filter(|tag| tag.as_str() == old_name)
                .for_each(|tag| *tag = new_name.to_owned()),
            None => tags.retain(|tag| tag != old_name),
        }
        rewritten += 1;
    }

    if rewritten > 0 {
        write_collection(StorageKey::Receipts, &receipts, store)?;
        tracing::debug!("Rewrote the tags of {rewritten} receipt(s)");
    }

    Ok(())
}
