use relstore::consts::page_consts::{DATA_SPACE, MAX_SLOTS, PAGE_SIZE};
use relstore::types::page_types::Page;
use relstore::StorageError;

#[test]
fn fresh_page_is_empty() {
    let page = Page::new(1);
    assert_eq!(page.header.page_id, 1);
    assert_eq!(page.header.free_space as usize, DATA_SPACE);
    assert_eq!(page.header.slots_amount, 0);
    assert!(page.slots().unwrap().is_empty());
}

#[test]
fn rows_pack_from_the_page_tail() {
    let mut page = Page::new(1);
    let s1 = page.insert_row_bytes(&[1u8; 10]).unwrap();
    let s2 = page.insert_row_bytes(&[2u8; 20]).unwrap();
    assert_eq!((s1, s2), (1, 2));

    let slots = page.slots().unwrap();
    // slot 1 sits at the very end; slot 2 immediately before it
    assert_eq!(slots[0].offset as usize, PAGE_SIZE - 10);
    assert_eq!(slots[1].offset as usize, PAGE_SIZE - 10 - 20);
    assert_eq!(page.header.free_space as usize, DATA_SPACE - 30);

    assert_eq!(page.row_bytes(&slots[0]).unwrap(), &[1u8; 10]);
    assert_eq!(page.row_bytes(&slots[1]).unwrap(), &[2u8; 20]);
}

#[test]
fn page_round_trips_through_bytes() {
    let mut page = Page::new(3);
    page.insert_row_bytes(b"abc").unwrap();
    let bytes = page.to_bytes().unwrap();
    let loaded = Page::from_bytes(bytes).unwrap();
    assert_eq!(loaded.header, page.header);
    let slot = loaded.find_slot(1).unwrap().unwrap();
    assert_eq!(loaded.row_bytes(&slot).unwrap(), b"abc");
}

#[test]
fn slot_cap_makes_the_33rd_row_unreachable() {
    let mut page = Page::new(1);
    for _ in 0..MAX_SLOTS {
        page.insert_row_bytes(&[0u8; 1]).unwrap();
    }
    // plenty of free space left, but no free slot
    assert!(page.header.free_space as usize > 1);
    assert!(matches!(
        page.insert_row_bytes(&[0u8; 1]),
        Err(StorageError::PageFull { .. })
    ));
    // earlier slots are untouched
    assert_eq!(page.header.slots_amount as usize, MAX_SLOTS);
}

#[test]
fn exhausted_free_space_is_page_full() {
    let mut page = Page::new(1);
    page.insert_row_bytes(&vec![7u8; DATA_SPACE - 10]).unwrap();
    assert!(matches!(
        page.insert_row_bytes(&[0u8; 11]),
        Err(StorageError::PageFull { .. })
    ));
    // a row that still fits goes through
    page.insert_row_bytes(&[0u8; 10]).unwrap();
}

#[test]
fn oversized_row_can_never_fit() {
    let mut page = Page::new(1);
    assert!(matches!(
        page.insert_row_bytes(&vec![0u8; DATA_SPACE + 1]),
        Err(StorageError::RowTooLarge { .. })
    ));
}

#[test]
fn slot_zero_means_empty() {
    let page = Page::new(1);
    assert!(page.find_slot(0).unwrap().is_none());
    assert!(page.find_slot(1).unwrap().is_none());
}

#[test]
fn delete_marks_without_reclaiming() {
    let mut page = Page::new(1);
    page.insert_row_bytes(&[1u8; 8]).unwrap();
    page.insert_row_bytes(&[2u8; 8]).unwrap();
    let free_before = page.header.free_space;

    page.mark_deleted(1).unwrap();
    let slot = page.find_slot(1).unwrap().unwrap();
    assert!(slot.is_deleted);
    assert_eq!(page.header.free_space, free_before);

    // deleting again reports the slot as gone
    assert!(matches!(
        page.mark_deleted(1),
        Err(StorageError::SlotNotFound {
            page_id: 1,
            slot_id: 1
        })
    ));
}
