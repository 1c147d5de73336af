mod stitch_snapshot_tests;
