mod tests {
    use blinken_matrix::{BlinkenPattern, FrameBuffer, FrameSource};

    #[test]
    fn test_frame_length_matches_matrix_count() {
        let frame = FrameBuffer::new(12);
        assert_eq!(frame.num_matrices(), 12);
        assert_eq!(frame.width(), 96);
        for row in 0..8 {
            assert_eq!(frame.row_data(row).len(), 12);
        }
    }

    #[test]
    fn test_set_pixel_maps_to_column_bit() {
        let mut frame = FrameBuffer::new(2);
        // Leftmost pixel of a matrix is the high bit of its column byte.
        frame.set_pixel(0, 0, true);
        assert_eq!(frame.row_data(0), &[0x80, 0x00]);
        frame.set_pixel(15, 0, true);
        assert_eq!(frame.row_data(0), &[0x80, 0x01]);
        frame.set_pixel(0, 0, false);
        assert_eq!(frame.row_data(0), &[0x00, 0x01]);
    }

    #[test]
    fn test_pixel_reads_back() {
        let mut frame = FrameBuffer::new(3);
        frame.set_pixel(10, 5, true);
        assert!(frame.pixel(10, 5));
        assert!(!frame.pixel(11, 5));
    }

    #[test]
    fn test_out_of_range_writes_are_ignored() {
        let mut frame = FrameBuffer::new(2);
        frame.set_pixel(16, 0, true);
        frame.set_pixel(0, 8, true);
        for row in 0..8 {
            assert_eq!(frame.row_data(row), &[0x00, 0x00]);
        }
        assert!(!frame.pixel(16, 0));
    }

    #[test]
    fn test_clear_turns_everything_off() {
        let mut frame = FrameBuffer::new(4);
        for x in 0..frame.width() {
            frame.set_pixel(x, 3, true);
        }
        frame.clear();
        for row in 0..8 {
            assert!(frame.row_data(row).iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_blinken_pattern_keeps_frame_length() {
        let mut frame = FrameBuffer::new(12);
        let mut pattern = BlinkenPattern::new(42);
        for _ in 0..10 {
            pattern.next_frame(&mut frame);
            assert_eq!(frame.num_matrices(), 12);
        }
    }

    #[test]
    fn test_blinken_pattern_is_deterministic_per_seed() {
        let mut a = FrameBuffer::new(4);
        let mut b = FrameBuffer::new(4);
        let mut source_a = BlinkenPattern::new(7);
        let mut source_b = BlinkenPattern::new(7);
        source_a.next_frame(&mut a);
        source_b.next_frame(&mut b);
        for row in 0..8 {
            assert_eq!(a.row_data(row), b.row_data(row));
        }
    }
}
