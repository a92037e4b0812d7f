use super::*;

fn numbers(bar: &PaginationBar) -> Vec<usize> {
    bar.page_numbers()
}

#[test]
fn total_pages_is_at_least_one() {
    assert_eq!(total_pages(0, 8), 1);
    assert_eq!(total_pages(1, 8), 1);
    assert_eq!(total_pages(8, 8), 1);
    assert_eq!(total_pages(9, 8), 2);
    assert_eq!(total_pages(17, 8), 3);
}

#[test]
fn slices_are_contiguous_and_truncated() {
    let items: Vec<u32> = (1..=17).collect();
    assert_eq!(visible_slice(&items, 1, 8), &items[0..8]);
    assert_eq!(visible_slice(&items, 3, 8), &items[16..17]);
    assert!(visible_slice(&items, 4, 8).is_empty());
    assert!(visible_slice(&items, 0, 8).is_empty());
}

#[test]
fn concatenated_pages_rebuild_the_list() {
    for len in [0usize, 1, 7, 8, 9, 16, 17, 40, 41] {
        let items: Vec<usize> = (0..len).collect();
        let pages = total_pages(len, DEFAULT_PAGE_SIZE);
        let rebuilt: Vec<usize> = (1..=pages)
            .flat_map(|page| visible_slice(&items, page, DEFAULT_PAGE_SIZE).iter().copied())
            .collect();
        assert_eq!(rebuilt, items, "len {len}");
    }
}

#[test]
fn single_page_has_one_button_and_no_controls() {
    let bar = PaginationBar::new(1, 1);
    assert_eq!(
        bar.buttons,
        vec![PageButton::Page {
            number: 1,
            active: true
        }]
    );
    assert!(!bar.previous_enabled());
    assert!(!bar.next_enabled());
    assert!(!bar.is_visible());
    assert!(pagination_bar(1, 1).is_none());
}

#[test]
fn three_pages_show_every_button_without_ellipses() {
    for page in 1..=3 {
        let bar = pagination_bar(page, 3).expect("visible");
        assert_eq!(numbers(&bar), vec![1, 2, 3]);
        assert_eq!(bar.ellipsis_count(), 0);
        assert_eq!(bar.next_enabled(), page < 3);
        assert_eq!(bar.previous_enabled(), page > 1);
    }
}

#[test]
fn middle_page_shows_both_edges_and_ellipses() {
    let bar = PaginationBar::new(6, 12);
    assert_eq!(
        bar.buttons,
        vec![
            PageButton::Page {
                number: 1,
                active: false
            },
            PageButton::Ellipsis,
            PageButton::Page {
                number: 4,
                active: false
            },
            PageButton::Page {
                number: 5,
                active: false
            },
            PageButton::Page {
                number: 6,
                active: true
            },
            PageButton::Page {
                number: 7,
                active: false
            },
            PageButton::Page {
                number: 8,
                active: false
            },
            PageButton::Ellipsis,
            PageButton::Page {
                number: 12,
                active: false
            },
        ]
    );
}

#[test]
fn window_shifts_at_boundaries_instead_of_shrinking() {
    assert_eq!(page_window(1, 12), (1, 5));
    assert_eq!(page_window(2, 12), (1, 5));
    assert_eq!(page_window(11, 12), (8, 12));
    assert_eq!(page_window(12, 12), (8, 12));
    assert_eq!(page_window(2, 4), (1, 4));

    let bar = PaginationBar::new(12, 12);
    assert_eq!(numbers(&bar), vec![1, 8, 9, 10, 11, 12]);
    assert_eq!(bar.ellipsis_count(), 1);
}

#[test]
fn no_ellipsis_when_window_touches_the_edge_neighbour() {
    let bar = PaginationBar::new(4, 7);
    assert_eq!(numbers(&bar), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(bar.ellipsis_count(), 0);
}

#[test]
fn window_always_has_five_buttons_when_possible() {
    for total in 5..=15 {
        for page in 1..=total {
            let (start, end) = page_window(page, total);
            assert_eq!(end - start + 1, MAX_PAGE_BUTTONS, "page {page}/{total}");
            assert!(start <= page && page <= end);
        }
    }
}

#[test]
fn previous_and_next_never_leave_range() {
    let first = PaginationBar::new(1, 4);
    assert_eq!(first.previous_target(), None);
    assert_eq!(first.next_target(), Some(2));

    let last = PaginationBar::new(4, 4);
    assert_eq!(last.next_target(), None);
    assert_eq!(last.previous_target(), Some(3));
}

#[test]
fn out_of_range_page_is_clamped_when_building_the_bar() {
    let bar = PaginationBar::new(99, 3);
    assert_eq!(bar.current, 3);
    let bar = PaginationBar::new(0, 3);
    assert_eq!(bar.current, 1);
}
